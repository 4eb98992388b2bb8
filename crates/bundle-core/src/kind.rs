//! Bundle kinds and their archive extensions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The kind of presets a bundle carries.
///
/// Each kind is archived under its own reserved extension so the host
/// application knows how to import it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleKind {
    #[default]
    Filament,
    Printer,
    Process,
}

impl BundleKind {
    /// Archive file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Filament => "orca_filament",
            Self::Printer => "orca_printer",
            Self::Process => "orca_process",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filament => "filament",
            Self::Printer => "printer",
            Self::Process => "process",
        }
    }

    /// Archive file name for a bundle of this kind.
    pub fn archive_name(&self, bundle_name: &str) -> String {
        format!("{}.{}", bundle_name, self.extension())
    }
}

impl FromStr for BundleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filament" => Ok(Self::Filament),
            "printer" => Ok(Self::Printer),
            "process" => Ok(Self::Process),
            _ => Err(Error::InvalidKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("filament", BundleKind::Filament, "orca_filament")]
    #[case("Printer", BundleKind::Printer, "orca_printer")]
    #[case(" process ", BundleKind::Process, "orca_process")]
    fn parses_kind_and_maps_extension(
        #[case] input: &str,
        #[case] kind: BundleKind,
        #[case] ext: &str,
    ) {
        let parsed: BundleKind = input.parse().unwrap();
        assert_eq!(parsed, kind);
        assert_eq!(parsed.extension(), ext);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "nozzle".parse::<BundleKind>().unwrap_err();
        assert!(err.to_string().contains("nozzle"));
    }

    #[test]
    fn archive_name_appends_extension() {
        assert_eq!(
            BundleKind::Filament.archive_name("Overture"),
            "Overture.orca_filament"
        );
    }

    #[test]
    fn default_is_filament() {
        assert_eq!(BundleKind::default(), BundleKind::Filament);
    }
}
