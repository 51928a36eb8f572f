use crate::padron::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub surname: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "nationalId")]
    pub national_id: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PadronConfig {
    pub operators: Vec<String>,
    /// Where the rosters are kept. Relative paths are relative to the configuration file.
    #[serde(rename = "dataDirectory")]
    pub data_directory: Option<String>,
    /// The substrings that identify the columns of the imported files.
    pub markers: Option<MarkerConfig>,
}

impl Default for PadronConfig {
    fn default() -> Self {
        PadronConfig {
            operators: (1..=5).map(|i| format!("usuario{}", i)).collect(),
            data_directory: None,
            markers: None,
        }
    }
}

impl PadronConfig {
    pub fn check_operator(&self, operator: &str) -> PadronResult<()> {
        if self.operators.iter().any(|o| o == operator) {
            Ok(())
        } else {
            UnknownOperatorSnafu {
                operator,
                known: self.operators.clone(),
            }
            .fail()
        }
    }

    pub fn marker_set(&self) -> PadronResult<MarkerSet> {
        match &self.markers {
            None => Ok(MarkerSet::DEFAULT_MARKERS),
            Some(mc) => {
                let m = MarkerSet::new(&mc.surname, &mc.first_name, &mc.national_id);
                if m.surname.is_empty() || m.first_name.is_empty() || m.national_id.is_empty() {
                    whatever!("The column markers cannot be empty: {:?}", mc)
                }
                Ok(m)
            }
        }
    }

    pub fn data_directory_path(&self, config_path: Option<&Path>) -> PathBuf {
        let root = config_path
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        match &self.data_directory {
            Some(d) => root.join(d),
            None => root,
        }
    }
}

pub fn read_config(path: &str) -> PadronResult<PadronConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: PadronConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    info!("config: {:?}", config);
    if config.operators.is_empty() {
        whatever!("No operator defined in {}", path)
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("padron.json");
        fs::write(
            &p,
            r#"{
                "operators": ["mesa1", "mesa2"],
                "dataDirectory": "datos",
                "markers": {"surname": "Last Name", "firstName": "first", "nationalId": "ID"}
            }"#,
        )
        .unwrap();
        let config = read_config(p.to_str().unwrap()).unwrap();
        assert_eq!(config.operators, vec!["mesa1", "mesa2"]);
        assert!(config.check_operator("mesa2").is_ok());
        assert!(matches!(
            config.check_operator("usuario1"),
            Err(PadronError::UnknownOperator { .. })
        ));
        assert_eq!(
            config.data_directory_path(Some(p.as_path())),
            dir.path().join("datos")
        );
        let m = config.marker_set().unwrap();
        assert_eq!(m, MarkerSet::new("lastname", "first", "id"));
    }

    #[test]
    fn defaults() {
        let config = PadronConfig::default();
        assert_eq!(config.operators.len(), 5);
        assert!(config.check_operator("usuario5").is_ok());
        assert!(config.check_operator("usuario6").is_err());
        assert_eq!(config.marker_set().unwrap(), MarkerSet::DEFAULT_MARKERS);
        assert_eq!(config.data_directory_path(None), PathBuf::new());
    }

    #[test]
    fn empty_marker() {
        let config = PadronConfig {
            markers: Some(MarkerConfig {
                surname: "apellido".to_string(),
                first_name: " _ ".to_string(),
                national_id: "dni".to_string(),
            }),
            ..PadronConfig::default()
        };
        assert!(matches!(
            config.marker_set(),
            Err(PadronError::Whatever { .. })
        ));
    }

    #[test]
    fn no_operators() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("padron.json");
        fs::write(&p, r#"{"operators": []}"#).unwrap();
        assert!(read_config(p.to_str().unwrap()).is_err());
    }
}
