//! Ensamblado del registro plano de propiedades.
//!
//! Internamente el resultado de una molécula es un `AdmeOutcome` tipado;
//! sólo al serializar se colapsa en el registro de 19 claves fijas (más el
//! eco del SMILES de entrada).
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use crate::descriptors::DescriptorVector;
use crate::rules::RuleEvaluation;

/// Clave bajo la que se repite el SMILES de entrada.
pub const SMILES_KEY: &str = "SMILES";

/// Valor que reemplaza a todas las propiedades cuando el SMILES no parsea.
pub const INVALID_SENTINEL: &str = "SMILES inválido";

pub const PROPERTY_NAMES: [&str; 19] = ["Peso Molecular (Da)",
                                        "Fórmula Molecular",
                                        "LogP",
                                        "Donantes de Enlaces-H",
                                        "Aceptores de Enlaces-H",
                                        "TPSA",
                                        "Enlaces Rotables",
                                        "QED",
                                        "Fracción Carbonos SP3",
                                        "Violaciones Lipinski",
                                        "Área de Superficie Polar",
                                        "Número de Anillos",
                                        "Número de Anillos Aromáticos",
                                        "Absorción GI",
                                        "Permeable a BBB",
                                        "Violaciones Ghose",
                                        "Violaciones Veber",
                                        "Violaciones Egan",
                                        "Violaciones Muegge"];

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Text(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::Integer(i) => write!(f, "{i}"),
            // los enteros en coma flotante conservan el decimal: 1.0, no 1
            PropertyValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            PropertyValue::Float(x) => write!(f, "{x}"),
        }
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Text(s) => serializer.serialize_str(s),
            PropertyValue::Integer(i) => serializer.serialize_i64(*i),
            PropertyValue::Float(x) => serializer.serialize_f64(*x),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<u32> for PropertyValue {
    fn from(i: u32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

/// Descriptores y reglas calculados para un SMILES válido.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmeProfile {
    pub smiles: String,
    pub descriptors: DescriptorVector,
    pub evaluation: RuleEvaluation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdmeOutcome {
    Computed(AdmeProfile),
    Invalid { smiles: String },
}

impl AdmeOutcome {
    pub fn smiles(&self) -> &str {
        match self {
            AdmeOutcome::Computed(profile) => &profile.smiles,
            AdmeOutcome::Invalid { smiles } => smiles,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, AdmeOutcome::Invalid { .. })
    }

    pub fn to_record(&self) -> PropertyRecord {
        match self {
            AdmeOutcome::Computed(profile) => PropertyRecord::from_profile(profile),
            AdmeOutcome::Invalid { smiles } => PropertyRecord::invalid(smiles),
        }
    }
}

/// Registro con exactamente las 19 propiedades de `PROPERTY_NAMES`, en ese
/// orden, más el SMILES de entrada.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    smiles: String,
    values: [PropertyValue; 19],
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    // evita "-0" en la salida
    if rounded == 0.0 { 0.0 } else { rounded }
}

impl PropertyRecord {
    pub fn invalid(smiles: &str) -> Self {
        Self { smiles: smiles.to_string(),
               values: std::array::from_fn(|_| PropertyValue::from(INVALID_SENTINEL)) }
    }

    pub fn from_profile(profile: &AdmeProfile) -> Self {
        let d = &profile.descriptors;
        let e = &profile.evaluation;
        let tpsa = round_to(d.tpsa, 2);
        Self { smiles: profile.smiles.clone(),
               values: [PropertyValue::Float(round_to(d.molecular_weight, 2)),
                        PropertyValue::from(d.formula.clone()),
                        PropertyValue::Float(round_to(d.logp, 2)),
                        PropertyValue::from(d.h_donors),
                        PropertyValue::from(d.h_acceptors),
                        PropertyValue::Float(tpsa),
                        PropertyValue::from(d.rotatable_bonds),
                        PropertyValue::Float(round_to(d.qed, 3)),
                        PropertyValue::Float(round_to(d.fraction_csp3, 3)),
                        PropertyValue::from(e.lipinski_violations),
                        PropertyValue::Float(tpsa),
                        PropertyValue::from(d.rings),
                        PropertyValue::from(d.aromatic_rings),
                        PropertyValue::from(e.gi_absorption.to_string()),
                        PropertyValue::from(e.bbb_permeant.to_string()),
                        PropertyValue::from(e.ghose_violations),
                        PropertyValue::from(e.veber_violations),
                        PropertyValue::from(e.egan_violations),
                        PropertyValue::from(e.muegge_violations)] }
    }

    pub fn smiles(&self) -> &str {
        &self.smiles
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        PROPERTY_NAMES.iter().position(|name| *name == key).map(|i| &self.values[i])
    }

    pub fn properties(&self) -> impl Iterator<Item = (&'static str, &PropertyValue)> {
        PROPERTY_NAMES.into_iter().zip(self.values.iter())
    }

    pub fn is_invalid(&self) -> bool {
        self.values.iter().all(|v| v.as_str() == Some(INVALID_SENTINEL))
    }

    /// Fila plana: `SMILES` primero y luego las 19 propiedades en orden.
    pub fn into_row(self) -> IndexMap<String, PropertyValue> {
        let mut row = IndexMap::with_capacity(PROPERTY_NAMES.len() + 1);
        row.insert(SMILES_KEY.to_string(), PropertyValue::Text(self.smiles));
        for (name, value) in PROPERTY_NAMES.into_iter().zip(self.values) {
            row.insert(name.to_string(), value);
        }
        row
    }
}

impl Serialize for PropertyRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PROPERTY_NAMES.len() + 1))?;
        map.serialize_entry(SMILES_KEY, &self.smiles)?;
        for (name, value) in self.properties() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
