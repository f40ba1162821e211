//! Building and saving custom unit systems

use tracing::{debug, info};
use crate::basis::BasisQuantity;
use crate::config::Scope;
use crate::definition::UnitSystemDefinition;
use crate::error::UnitSystemError;
use crate::storage::{validate_name, Storage};
use crate::validate::validate;

/// Collects the basis of a new unit system.
///
/// ```ignore
/// let definition = UnitSystemBuilder::new("natural")
///     .constant(BasisQuantity::constant("c")?)
///     .constant(BasisQuantity::constant("hbar")?)
///     .unit(BasisQuantity::unit("eV")?)
///     .scope(Scope::Global)
///     .build(&storage)?;
/// ```
#[derive(Debug, Clone)]
pub struct UnitSystemBuilder {
    name: String,
    constants: Vec<BasisQuantity>,
    units: Vec<BasisQuantity>,
    labels: Option<Vec<String>>,
    scope: Scope,
    overwrite: bool,
}

impl UnitSystemBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        UnitSystemBuilder {
            name: name.into(),
            constants: Vec::new(),
            units: Vec::new(),
            labels: None,
            scope: Scope::Local,
            overwrite: false,
        }
    }

    /// Add a quantity whose powers form the numeric conversion factor
    pub fn constant(mut self, quantity: BasisQuantity) -> Self {
        self.constants.push(quantity);
        self
    }

    pub fn constants(mut self, quantities: impl IntoIterator<Item = BasisQuantity>) -> Self {
        self.constants.extend(quantities);
        self
    }

    /// Add a quantity whose powers form the unit results are expressed in
    pub fn unit(mut self, quantity: BasisQuantity) -> Self {
        self.units.push(quantity);
        self
    }

    pub fn units(mut self, quantities: impl IntoIterator<Item = BasisQuantity>) -> Self {
        self.units.extend(quantities);
        self
    }

    /// Labels for the constants, one each, in order
    pub fn labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Validate the basis and complete it, without touching storage.
    ///
    /// Every base dimension the candidates leave untouched gets its SI base
    /// unit appended to the units, then the completed list is validated again.
    pub fn definition(&self) -> Result<UnitSystemDefinition, UnitSystemError> {
        validate_name(&self.name)?;

        let labels = match &self.labels {
            Some(labels) if labels.len() != self.constants.len() => {
                return Err(UnitSystemError::InvalidDefinition(format!(
                    "{} labels given for {} constants",
                    labels.len(),
                    self.constants.len()
                )));
            }
            Some(labels) => labels.clone(),
            None => self.constants.iter().map(|c| c.label().to_string()).collect(),
        };

        let constants: Vec<BasisQuantity> = self
            .constants
            .iter()
            .zip(&labels)
            .map(|(constant, label)| constant.clone().with_label(label.clone()))
            .collect();

        let candidates: Vec<BasisQuantity> = constants.iter().chain(&self.units).cloned().collect();
        let partial = validate(&candidates)?;

        let mut units = self.units.clone();
        units.extend(partial.unspanned.iter().map(|&dim| BasisQuantity::si_base(dim)));
        if !partial.unspanned.is_empty() {
            debug!(
                name = %self.name,
                appended = ?partial.unspanned,
                "Completing basis with SI base units"
            );
        }

        let candidates: Vec<BasisQuantity> = constants.iter().chain(&units).cloned().collect();
        let basis = validate(&candidates)?;

        Ok(UnitSystemDefinition {
            name: self.name.clone(),
            constants,
            units,
            labels,
            si_basis: basis.slots(),
            matrix: basis.matrix,
            inverse: basis.inverse,
        })
    }

    /// Validate, complete and save the system.
    ///
    /// An existing system with the same name and scope is only replaced
    /// when overwriting is enabled.
    pub fn build(&self, storage: &Storage) -> Result<UnitSystemDefinition, UnitSystemError> {
        if !self.overwrite && storage.exists(&self.name, self.scope)? {
            return Err(UnitSystemError::AlreadyExists {
                name: self.name.clone(),
                scope: self.scope,
                path: storage.path_for(&self.name, self.scope)?,
            });
        }

        let definition = self.definition()?;
        let path = storage.write(&self.name, self.scope, &definition.to_json()?, self.overwrite)?;
        info!(
            name = %self.name,
            constants = definition.constants.len(),
            units = definition.units.len(),
            path = %path.display(),
            "Built unit system"
        );
        Ok(definition)
    }
}

/// Build and save a unit system in one call
pub fn create_unit_system(
    storage: &Storage,
    name: &str,
    constants: Vec<BasisQuantity>,
    units: Vec<BasisQuantity>,
    scope: Scope,
    overwrite: bool,
) -> Result<UnitSystemDefinition, UnitSystemError> {
    UnitSystemBuilder::new(name)
        .constants(constants)
        .units(units)
        .scope(scope)
        .overwrite(overwrite)
        .build(storage)
}
