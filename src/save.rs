//! Versioned pet save snapshot.
//!
//! A compact, serde-serializable image of everything worth keeping across a
//! power cycle. Stored as a postcard blob by the persistence adapter; the
//! wall-clock timestamp rides next to the blob (not inside it) so offline
//! time can be computed without decoding the snapshot.
//!
//! Transient state is deliberately absent: mood, activity and the attention
//! flag are derived on the first update after restore, and `has_waste`
//! collapses into the waste count.

use serde::{Deserialize, Serialize};

use crate::error::SaveError;
use crate::pet::{Activity, Pet, Stage};

/// Bump on any incompatible layout change; older blobs are refused and the
/// caller starts a fresh pet.
pub const SAVE_VERSION: u8 = 1;

/// Persistent pet image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u8,
    pub hunger: u8,
    pub happiness: u8,
    pub health: u8,
    pub energy: u8,
    pub weight: u8,
    pub discipline: u8,
    /// Raw [`Stage`] discriminant.
    pub stage: u8,
    pub age_minutes: u32,
    pub is_sick: bool,
    pub waste_count: u8,
    pub is_sleeping: bool,
    pub games_won: u16,
    pub games_played: u16,
    pub times_fed: u16,
    pub times_played: u16,
    pub times_cleaned: u16,
    pub times_medicated: u16,
}

impl SaveData {
    /// Snapshot a pet for persistence.
    pub fn capture(pet: &Pet) -> Self {
        Self {
            version: SAVE_VERSION,
            hunger: pet.hunger,
            happiness: pet.happiness,
            health: pet.health,
            energy: pet.energy,
            weight: pet.weight,
            discipline: pet.discipline,
            stage: pet.stage as u8,
            age_minutes: pet.age_minutes,
            is_sick: pet.is_sick,
            waste_count: pet.waste_count,
            is_sleeping: pet.is_sleeping,
            games_won: pet.games_won,
            games_played: pet.games_played,
            times_fed: pet.times_fed,
            times_played: pet.times_played,
            times_cleaned: pet.times_cleaned,
            times_medicated: pet.times_medicated,
        }
    }

    /// Rebuild a pet from the snapshot.
    ///
    /// Timing markers restart from zero (the millisecond clock does not
    /// survive a power cycle) and derived state is recomputed on the first
    /// update.
    pub fn restore(&self) -> Result<Pet, SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch);
        }
        let stage = Stage::from_u8(self.stage).ok_or(SaveError::Corrupted)?;

        let mut pet = Pet::new(0);
        pet.hunger = self.hunger;
        pet.happiness = self.happiness;
        pet.health = self.health;
        pet.energy = self.energy;
        pet.weight = self.weight;
        pet.discipline = self.discipline;
        pet.stage = stage;
        pet.age_minutes = self.age_minutes;
        pet.is_sick = self.is_sick;
        pet.waste_count = self.waste_count;
        pet.has_waste = self.waste_count > 0;
        pet.is_sleeping = self.is_sleeping;
        pet.games_won = self.games_won;
        pet.games_played = self.games_played;
        pet.times_fed = self.times_fed;
        pet.times_played = self.times_played;
        pet.times_cleaned = self.times_cleaned;
        pet.times_medicated = self.times_medicated;

        pet.activity = match stage {
            Stage::Egg => Activity::Hatching,
            _ if self.is_sleeping => Activity::Sleeping,
            _ => Activity::Idle,
        };

        Ok(pet)
    }

    /// Encode to the storage blob format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SaveError> {
        postcard::to_allocvec(self).map_err(|_| SaveError::Io)
    }

    /// Decode a storage blob. Any decode failure means the blob is not a
    /// snapshot we wrote.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SaveError> {
        postcard::from_bytes(bytes).map_err(|_| SaveError::Corrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// A pet with plenty of non-default state to catch dropped fields.
    fn lived_in_pet() -> Pet {
        let cfg = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut pet = Pet::new(0);
        pet.advance(&cfg, 3 * 24 * 60 * 60_000, &mut rng); // three days in one gulp
        pet.hunger = 73;
        pet.happiness = 61;
        pet.weight = 31;
        pet.discipline = 12;
        pet.games_won = 4;
        pet.games_played = 9;
        pet.times_fed = 40;
        pet.times_played = 9;
        pet.times_cleaned = 7;
        pet.times_medicated = 2;
        pet
    }

    #[test]
    fn capture_restore_preserves_persistent_fields() {
        let pet = lived_in_pet();
        let restored = SaveData::capture(&pet).restore().unwrap();

        assert_eq!(restored.hunger, pet.hunger);
        assert_eq!(restored.happiness, pet.happiness);
        assert_eq!(restored.health, pet.health);
        assert_eq!(restored.energy, pet.energy);
        assert_eq!(restored.weight, pet.weight);
        assert_eq!(restored.discipline, pet.discipline);
        assert_eq!(restored.stage, pet.stage);
        assert_eq!(restored.age_minutes, pet.age_minutes);
        assert_eq!(restored.is_sick, pet.is_sick);
        assert_eq!(restored.waste_count, pet.waste_count);
        assert_eq!(restored.is_sleeping, pet.is_sleeping);
        assert_eq!(restored.games_won, pet.games_won);
        assert_eq!(restored.games_played, pet.games_played);
        assert_eq!(restored.times_fed, pet.times_fed);
        assert_eq!(restored.times_played, pet.times_played);
        assert_eq!(restored.times_cleaned, pet.times_cleaned);
        assert_eq!(restored.times_medicated, pet.times_medicated);
    }

    #[test]
    fn waste_flag_is_rederived_from_count() {
        let mut pet = lived_in_pet();
        pet.waste_count = 3;
        pet.has_waste = true;
        let restored = SaveData::capture(&pet).restore().unwrap();
        assert!(restored.has_waste);

        pet.waste_count = 0;
        pet.has_waste = false;
        let restored = SaveData::capture(&pet).restore().unwrap();
        assert!(!restored.has_waste);
    }

    #[test]
    fn sleeping_pet_restores_asleep() {
        let mut pet = lived_in_pet();
        assert!(pet.sleep());
        let restored = SaveData::capture(&pet).restore().unwrap();
        assert!(restored.is_sleeping);
        assert_eq!(restored.activity, Activity::Sleeping);
    }

    #[test]
    fn egg_restores_hatching() {
        let pet = Pet::new(0);
        let restored = SaveData::capture(&pet).restore().unwrap();
        assert_eq!(restored.stage, Stage::Egg);
        assert_eq!(restored.activity, Activity::Hatching);
    }

    #[test]
    fn unknown_version_is_refused() {
        let mut data = SaveData::capture(&lived_in_pet());
        data.version = SAVE_VERSION + 1;
        assert_eq!(data.restore().unwrap_err(), SaveError::VersionMismatch);
    }

    #[test]
    fn garbage_stage_byte_is_corrupted() {
        let mut data = SaveData::capture(&lived_in_pet());
        data.stage = 250;
        assert_eq!(data.restore().unwrap_err(), SaveError::Corrupted);
    }

    #[test]
    fn blob_roundtrip() {
        let data = SaveData::capture(&lived_in_pet());
        let bytes = data.to_bytes().unwrap();
        assert_eq!(SaveData::from_bytes(&bytes).unwrap(), data);
    }

    #[test]
    fn truncated_blob_is_corrupted() {
        let bytes = SaveData::capture(&lived_in_pet()).to_bytes().unwrap();
        assert_eq!(
            SaveData::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err(),
            SaveError::Corrupted
        );
    }
}
