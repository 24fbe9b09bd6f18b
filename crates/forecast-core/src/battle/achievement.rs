use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstBlood,
    ForceSensitive,
    ComboMaster,
    SithLord,
    NoMercy,
    TheChosenOne,
    DoOrDoNot,
    TheseArentTheDroids,
}

impl Achievement {
    pub const ALL: [Achievement; 8] = [
        Achievement::FirstBlood,
        Achievement::ForceSensitive,
        Achievement::ComboMaster,
        Achievement::SithLord,
        Achievement::NoMercy,
        Achievement::TheChosenOne,
        Achievement::DoOrDoNot,
        Achievement::TheseArentTheDroids,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstBlood => "First Blood",
            Achievement::ForceSensitive => "Force Sensitive",
            Achievement::ComboMaster => "Combo Master",
            Achievement::SithLord => "Sith Lord",
            Achievement::NoMercy => "No Mercy",
            Achievement::TheChosenOne => "The Chosen One",
            Achievement::DoOrDoNot => "Do or Do Not",
            Achievement::TheseArentTheDroids => "These Aren't The Droids",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstBlood => "Defeat your first opponent",
            Achievement::ForceSensitive => "Use Force powers 10 times",
            Achievement::ComboMaster => "Achieve a 5-hit combo",
            Achievement::SithLord => "Defeat Darth Vader",
            Achievement::NoMercy => "Win a duel without taking damage",
            Achievement::TheChosenOne => "Complete all battles",
            Achievement::DoOrDoNot => "Use only Force powers to win",
            Achievement::TheseArentTheDroids => "Find the hidden easter egg",
        }
    }
}

/// Unlocked achievements in unlock order. Never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementSet(Vec<Achievement>);

impl AchievementSet {
    /// Returns `true` if the achievement was newly unlocked.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        if self.0.contains(&achievement) {
            return false;
        }
        self.0.push(achievement);
        true
    }

    pub fn contains(&self, achievement: Achievement) -> bool {
        self.0.contains(&achievement)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Achievement> + '_ {
        self.0.iter().copied()
    }
}
