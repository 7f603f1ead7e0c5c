//! In-memory oracle backed by ordered maps.

use std::collections::BTreeMap;

use super::{
    EnemyOracle, EnemyTemplate, EquipmentOracle, EquipmentTemplate, MaterialDefinition,
    MaterialOracle,
};

/// Every static table keyed by id.
///
/// Implements all lookup oracles, so one value can back an entire [`super::Env`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTables {
    pub materials: BTreeMap<String, MaterialDefinition>,
    pub equipment: BTreeMap<String, EquipmentTemplate>,
    pub enemies: BTreeMap<String, EnemyTemplate>,
}

impl StaticTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_material(mut self, material: MaterialDefinition) -> Self {
        self.materials.insert(material.id.clone(), material);
        self
    }

    pub fn with_equipment(mut self, template: EquipmentTemplate) -> Self {
        self.equipment.insert(template.id.clone(), template);
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyTemplate) -> Self {
        self.enemies.insert(enemy.id.clone(), enemy);
        self
    }
}

impl MaterialOracle for StaticTables {
    fn material(&self, id: &str) -> Option<&MaterialDefinition> {
        self.materials.get(id)
    }
}

impl EquipmentOracle for StaticTables {
    fn template(&self, id: &str) -> Option<&EquipmentTemplate> {
        self.equipment.get(id)
    }
}

impl EnemyOracle for StaticTables {
    fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }
}
