//! Operator control state
//!
//! The operator panel selects which mode drives decisions and supplies the
//! goals for each mode. Updates are partial: only the fields present in a
//! [`ControlUpdate`] are overwritten, unknown keys are dropped by serde.

use serde::{Deserialize, Serialize};

/// Quest used when the operator has not picked one
pub const DEFAULT_QUEST: &str = "Cook's Assistant";

/// Decision mode selected by the operator
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    #[default]
    Quest,
    Skill,
    Manual,
    /// A mode name the engine does not implement, kept in folded form
    Other(String),
}

impl Mode {
    /// Interpret an operator-supplied mode name. Empty means quest.
    pub fn parse(raw: &str) -> Self {
        let folded = raw.trim().to_lowercase();
        match folded.as_str() {
            "" | "quest" => Mode::Quest,
            "skill" => Mode::Skill,
            "manual" => Mode::Manual,
            _ => Mode::Other(folded),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Mode::Quest => "quest",
            Mode::Skill => "skill",
            Mode::Manual => "manual",
            Mode::Other(name) => name,
        }
    }
}

impl From<String> for Mode {
    fn from(raw: String) -> Self {
        Mode::parse(&raw)
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide operator settings read on every decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub mode: Mode,
    pub current_quest: String,
    pub do_all_quests: bool,
    pub skill_target: String,
    pub skill_target_level: u32,
    pub skill_budget_gp: u64,
    pub skilling_goal: String,
    pub manual_goal: String,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            mode: Mode::Quest,
            current_quest: DEFAULT_QUEST.to_string(),
            do_all_quests: false,
            skill_target: "Mining".to_string(),
            skill_target_level: 10,
            skill_budget_gp: 5000,
            skilling_goal: "Train the selected skill safely.".to_string(),
            manual_goal: String::new(),
        }
    }
}

impl ControlState {
    /// Merge a partial update; absent fields keep their current value
    pub fn apply(&mut self, update: ControlUpdate) {
        if let Some(mode) = update.mode {
            self.mode = mode;
        }
        if let Some(current_quest) = update.current_quest {
            self.current_quest = current_quest;
        }
        if let Some(do_all_quests) = update.do_all_quests {
            self.do_all_quests = do_all_quests;
        }
        if let Some(skill_target) = update.skill_target {
            self.skill_target = skill_target;
        }
        if let Some(level) = update.skill_target_level {
            self.skill_target_level = level;
        }
        if let Some(budget) = update.skill_budget_gp {
            self.skill_budget_gp = budget;
        }
        if let Some(skilling_goal) = update.skilling_goal {
            self.skilling_goal = skilling_goal;
        }
        if let Some(manual_goal) = update.manual_goal {
            self.manual_goal = manual_goal;
        }
    }
}

/// Partial control update sent by the operator panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControlUpdate {
    pub mode: Option<Mode>,
    pub current_quest: Option<String>,
    pub do_all_quests: Option<bool>,
    pub skill_target: Option<String>,
    pub skill_target_level: Option<u32>,
    pub skill_budget_gp: Option<u64>,
    pub skilling_goal: Option<String>,
    pub manual_goal: Option<String>,
}

impl ControlUpdate {
    /// Names of the fields this update will overwrite, for logging
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.mode.is_some() {
            names.push("mode");
        }
        if self.current_quest.is_some() {
            names.push("current_quest");
        }
        if self.do_all_quests.is_some() {
            names.push("do_all_quests");
        }
        if self.skill_target.is_some() {
            names.push("skill_target");
        }
        if self.skill_target_level.is_some() {
            names.push("skill_target_level");
        }
        if self.skill_budget_gp.is_some() {
            names.push("skill_budget_gp");
        }
        if self.skilling_goal.is_some() {
            names.push("skilling_goal");
        }
        if self.manual_goal.is_some() {
            names.push("manual_goal");
        }
        names
    }
}
