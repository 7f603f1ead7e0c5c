use crate::stats::CombatStats;

pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: &str) -> Option<&EnemyTemplate>;
}

/// What a drop-table entry yields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DropKind {
    /// Resource units of a material id.
    Material(String),
    /// A freshly instantiated equipment template.
    Equipment(String),
}

/// How many units a successful drop yields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DropCount {
    Fixed(u32),
    /// Inclusive bounds.
    Range(u32, u32),
}

impl Default for DropCount {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropEntry {
    pub kind: DropKind,
    /// Probability in `[0, 1]`, rolled independently per entry.
    pub chance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub count: DropCount,
}

impl DropEntry {
    pub fn new(kind: DropKind, chance: f64, count: DropCount) -> Self {
        Self {
            kind,
            chance,
            count,
        }
    }
}

/// Static description of an enemy type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub health: f64,
    pub attack: f64,
    pub defense: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub luck: f64,
    /// Experience granted on defeat.
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drop_table: Vec<DropEntry>,
}

impl EnemyTemplate {
    pub fn new(id: impl Into<String>, health: f64, attack: f64, defense: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            health,
            attack,
            defense,
            luck: 0.0,
            experience: 0,
            drop_table: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_experience(mut self, experience: u64) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_drop(mut self, entry: DropEntry) -> Self {
        self.drop_table.push(entry);
        self
    }

    pub fn combat_stats(&self) -> CombatStats {
        CombatStats::new(self.attack, self.defense, self.luck)
    }
}
