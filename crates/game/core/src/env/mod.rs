//! Traits describing read-only game data.
//!
//! Oracles expose the material table, equipment catalog, enemy templates and
//! the RNG. The [`Env`] aggregate bundles them so engine operations can reach
//! everything they need without coupling to a concrete data source.
mod enemies;
mod equipment;
mod error;
mod materials;
mod rng;
mod tables;

pub use enemies::{DropCount, DropEntry, DropKind, EnemyOracle, EnemyTemplate};
pub use equipment::{EquipmentOracle, EquipmentTemplate};
pub use error::OracleError;
pub use materials::{MaterialDefinition, MaterialOracle, MaterialTrait};
pub use rng::{PcgRng, RngOracle, RollContext, RollSeed, compute_seed};
pub use tables::StaticTables;

/// Aggregates read-only oracles required by engine operations.
pub struct Env<'a, M, E, N, R>
where
    M: MaterialOracle + ?Sized,
    E: EquipmentOracle + ?Sized,
    N: EnemyOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    materials: Option<&'a M>,
    equipment: Option<&'a E>,
    enemies: Option<&'a N>,
    rng: Option<&'a R>,
}

// Manual impls: derives would demand `Clone` of the (possibly unsized) oracles.
impl<M, E, N, R> Clone for Env<'_, M, E, N, R>
where
    M: MaterialOracle + ?Sized,
    E: EquipmentOracle + ?Sized,
    N: EnemyOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, E, N, R> Copy for Env<'_, M, E, N, R>
where
    M: MaterialOracle + ?Sized,
    E: EquipmentOracle + ?Sized,
    N: EnemyOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<
    'a,
    dyn MaterialOracle + 'a,
    dyn EquipmentOracle + 'a,
    dyn EnemyOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, M, E, N, R> Env<'a, M, E, N, R>
where
    M: MaterialOracle + ?Sized,
    E: EquipmentOracle + ?Sized,
    N: EnemyOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        materials: Option<&'a M>,
        equipment: Option<&'a E>,
        enemies: Option<&'a N>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            materials,
            equipment,
            enemies,
            rng,
        }
    }

    pub fn with_all(materials: &'a M, equipment: &'a E, enemies: &'a N, rng: &'a R) -> Self {
        Self::new(Some(materials), Some(equipment), Some(enemies), Some(rng))
    }

    pub fn empty() -> Self {
        Self::new(None, None, None, None)
    }

    pub fn materials(&self) -> Result<&'a M, OracleError> {
        self.materials.ok_or(OracleError::MaterialsNotAvailable)
    }

    pub fn equipment(&self) -> Result<&'a E, OracleError> {
        self.equipment.ok_or(OracleError::EquipmentNotAvailable)
    }

    pub fn enemies(&self) -> Result<&'a N, OracleError> {
        self.enemies.ok_or(OracleError::EnemiesNotAvailable)
    }

    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Looks up a material, failing if the oracle or the id is missing.
    pub fn material(&self, id: &str) -> Result<&'a MaterialDefinition, OracleError> {
        self.materials()?
            .material(id)
            .ok_or_else(|| OracleError::MaterialNotFound(id.to_owned()))
    }

    pub fn equipment_template(&self, id: &str) -> Result<&'a EquipmentTemplate, OracleError> {
        self.equipment()?
            .template(id)
            .ok_or_else(|| OracleError::EquipmentTemplateNotFound(id.to_owned()))
    }

    pub fn enemy(&self, id: &str) -> Result<&'a EnemyTemplate, OracleError> {
        self.enemies()?
            .enemy(id)
            .ok_or_else(|| OracleError::EnemyNotFound(id.to_owned()))
    }
}

impl<'a, M, E, N, R> Env<'a, M, E, N, R>
where
    M: MaterialOracle + 'a,
    E: EquipmentOracle + 'a,
    N: EnemyOracle + 'a,
    R: RngOracle + 'a,
{
    /// Erases the concrete oracle types.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let materials: Option<&'a dyn MaterialOracle> = self.materials.map(|m| m as _);
        let equipment: Option<&'a dyn EquipmentOracle> = self.equipment.map(|e| e as _);
        let enemies: Option<&'a dyn EnemyOracle> = self.enemies.map(|n| n as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|r| r as _);
        Env::new(materials, equipment, enemies, rng)
    }
}

impl<'a> GameEnv<'a> {
    /// Backs every lookup oracle with one [`StaticTables`].
    pub fn from_tables(tables: &'a StaticTables, rng: &'a dyn RngOracle) -> Self {
        Env::new(
            Some(tables as &'a dyn MaterialOracle),
            Some(tables as &'a dyn EquipmentOracle),
            Some(tables as &'a dyn EnemyOracle),
            Some(rng),
        )
    }
}
