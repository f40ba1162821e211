//! Loading saved unit systems

use tracing::info;
use crate::config::Scope;
use crate::converter::UnitSystem;
use crate::definition::UnitSystemDefinition;
use crate::error::UnitSystemError;
use crate::storage::Storage;

/// Read and parse a stored definition.
///
/// A missing file is `NotFound`; a file that cannot be parsed or fails the
/// definition invariants is `CorruptDefinition`.
pub fn load_definition(
    storage: &Storage,
    name: &str,
    scope: Scope,
) -> Result<UnitSystemDefinition, UnitSystemError> {
    let (path, text) = storage.read(name, scope)?;
    let definition = UnitSystemDefinition::from_json(&text, &path)?;
    info!(name, %scope, path = %path.display(), "Loaded unit system");
    Ok(definition)
}

/// Load a stored system ready for conversions
pub fn load_unit_system(storage: &Storage, name: &str, scope: Scope) -> Result<UnitSystem, UnitSystemError> {
    load_definition(storage, name, scope).map(UnitSystem::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::BasisQuantity;
    use crate::builder::UnitSystemBuilder;
    use crate::config::StorageConfig;
    use std::fs;
    use tempfile::TempDir;
    use unitsys_units::Quantity;

    fn storage(tmp: &TempDir) -> Storage {
        Storage::new(StorageConfig::new(tmp.path(), tmp.path().join("global")))
    }

    #[test]
    fn test_load_reproduces_definition() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        let built = UnitSystemBuilder::new("astro")
            .constant(BasisQuantity::constant("G").unwrap())
            .units([BasisQuantity::unit("kpc").unwrap(), BasisQuantity::unit("solMass").unwrap()])
            .labels(["grav"])
            .build(&storage)
            .unwrap();

        let loaded = load_definition(&storage, "astro", Scope::Local).unwrap();
        assert_eq!(loaded, built);
        assert_eq!(loaded.labels, vec!["grav"]);
        assert_eq!(loaded.matrix, built.matrix);
        assert_eq!(loaded.inverse, built.inverse);
    }

    #[test]
    fn test_unit_label_survives_reload() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        let built = UnitSystemBuilder::new("natural")
            .constants([BasisQuantity::constant("c").unwrap(), BasisQuantity::constant("hbar").unwrap()])
            .unit(BasisQuantity::unit("eV").unwrap().with_label("energy"))
            .build(&storage)
            .unwrap();

        let loaded = load_unit_system(&storage, "natural", Scope::Local).unwrap();
        assert_eq!(loaded.definition(), &built);
        assert_eq!(loaded.definition().basis_labels()[..3], ["c", "hbar", "energy"]);

        let factor = loaded.get_factor(&Quantity::parse(1.0, "m").unwrap()).unwrap();
        assert_eq!(factor.to_string(), "c^-1 hbar^-1 energy^1");
        assert_eq!(factor.get("energy"), Some(1.0));
    }

    #[test]
    fn test_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = load_unit_system(&storage(&tmp), "does_not_exist", Scope::Global).unwrap_err();
        assert!(matches!(err, UnitSystemError::NotFound { .. }));
    }

    #[test]
    fn test_corrupt_file() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        fs::write(tmp.path().join(".unit_broken.json"), "{\"format\": 1}").unwrap();
        let err = load_unit_system(&storage, "broken", Scope::Local).unwrap_err();
        assert!(matches!(err, UnitSystemError::CorruptDefinition { .. }));
    }

    #[test]
    fn test_scopes_are_separate() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        UnitSystemBuilder::new("x")
            .unit(BasisQuantity::unit("km").unwrap())
            .scope(Scope::Global)
            .build(&storage)
            .unwrap();
        assert!(load_unit_system(&storage, "x", Scope::Global).is_ok());
        assert!(matches!(
            load_unit_system(&storage, "x", Scope::Local),
            Err(UnitSystemError::NotFound { .. })
        ));
    }
}
