use serde::Serialize;

/// One opponent in the fixed roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Enemy {
    pub name: &'static str,
    pub max_health: u32,
    pub max_force: u32,
    /// Difficulty tier, 1 = weakest. Also the score multiplier.
    pub difficulty: u32,
    pub quote: &'static str,
    pub color: &'static str,
}

/// Opponents in the order they are fought, ascending difficulty.
pub const ROSTER: [Enemy; 5] = [
    Enemy {
        name: "Padawan Trainee",
        max_health: 80,
        max_force: 60,
        difficulty: 1,
        quote: "I will prove myself to the Council!",
        color: "blue",
    },
    Enemy {
        name: "Jedi Knight",
        max_health: 120,
        max_force: 100,
        difficulty: 2,
        quote: "The Force will guide me to victory.",
        color: "green",
    },
    Enemy {
        name: "Sith Apprentice",
        max_health: 150,
        max_force: 120,
        difficulty: 3,
        quote: "Your fear will be your downfall!",
        color: "red",
    },
    Enemy {
        name: "Jedi Master",
        max_health: 200,
        max_force: 150,
        difficulty: 4,
        quote: "Size matters not. Judge me by my size, do you?",
        color: "purple",
    },
    Enemy {
        name: "Darth Vader",
        max_health: 300,
        max_force: 200,
        difficulty: 5,
        quote: "I find your lack of faith disturbing.",
        color: "crimson",
    },
];

/// Roster entry at `index`, if any.
pub fn enemy(index: usize) -> Option<&'static Enemy> {
    ROSTER.get(index)
}

pub fn is_final(index: usize) -> bool {
    index + 1 == ROSTER.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_ascends_in_difficulty() {
        for pair in ROSTER.windows(2) {
            assert!(pair[0].difficulty < pair[1].difficulty);
            assert!(pair[0].max_health < pair[1].max_health);
        }
    }

    #[test]
    fn final_entry_is_vader() {
        assert!(is_final(4));
        assert!(!is_final(3));
        assert_eq!(enemy(4).map(|e| e.name), Some("Darth Vader"));
        assert!(enemy(5).is_none());
    }
}
