//! Reading the ordered class-name list.
//!
//! The list is usually passed on the command line, but training setups
//! already keep it in a YOLO `data.yaml` (`names:` as a sequence or as an
//! `index: name` mapping) or a `classes.txt` with one name per line. Both
//! files are accepted here so the label indices always agree with the
//! dataset config the trainer reads.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConvertError;

/// Largest class count a `names:` mapping may describe.
///
/// Mapping keys are indices, so one stray large key would otherwise ask
/// for a list of that length.
const MAX_MAPPED_CLASSES: usize = 1 << 16;

#[derive(Debug, Deserialize)]
struct DataYaml {
    names: DataYamlNames,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataYamlNames {
    Sequence(Vec<String>),
    Mapping(BTreeMap<usize, String>),
}

/// Reads class names from `path`, choosing the parser by extension.
///
/// `.yaml` / `.yml` files are read as YOLO dataset configs, anything else
/// as a plain list with one name per line.
pub fn read_class_names(path: &Path) -> Result<Vec<String>, ConvertError> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        read_data_yaml_names(path)
    } else {
        read_classes_txt(path)
    }
}

/// Reads the `names` entry of a YOLO `data.yaml`.
///
/// A mapping with gaps is filled with `class_<n>` placeholders so that
/// indices stay positional.
pub fn read_data_yaml_names(path: &Path) -> Result<Vec<String>, ConvertError> {
    let data = fs::read_to_string(path).map_err(ConvertError::Io)?;
    let parsed: DataYaml =
        serde_yaml::from_str(&data).map_err(|source| ConvertError::ClassesYamlParse {
            path: path.to_path_buf(),
            source,
        })?;

    let names = match parsed.names {
        DataYamlNames::Sequence(names) => names,
        DataYamlNames::Mapping(mapping) => {
            let Some(max_index) = mapping.keys().max().copied() else {
                return Ok(Vec::new());
            };
            if max_index >= MAX_MAPPED_CLASSES {
                return Err(ConvertError::ClassesFileInvalid {
                    path: path.to_path_buf(),
                    message: format!(
                        "class index {} in 'names' is too large (limit {})",
                        max_index,
                        MAX_MAPPED_CLASSES - 1
                    ),
                });
            }
            let mut names = vec![String::new(); max_index + 1];
            for (index, name) in mapping {
                names[index] = name;
            }
            for (index, name) in names.iter_mut().enumerate() {
                if name.trim().is_empty() {
                    *name = format!("class_{}", index);
                }
            }
            names
        }
    };

    Ok(names)
}

/// Reads a `classes.txt`: one name per line, surrounding whitespace trimmed.
///
/// Trailing blank lines are ignored; a blank line between names is an
/// error because it would shift every following index.
pub fn read_classes_txt(path: &Path) -> Result<Vec<String>, ConvertError> {
    let data = fs::read_to_string(path).map_err(ConvertError::Io)?;
    let lines: Vec<&str> = data.lines().collect();
    let used = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |last| last + 1);

    let mut names = Vec::with_capacity(used);
    for (line_idx, line) in lines[..used].iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(ConvertError::ClassesFileInvalid {
                path: path.to_path_buf(),
                message: format!("line {} is empty", line_idx + 1),
            });
        }
        names.push(trimmed.to_string());
    }

    Ok(names)
}

/// Splits a comma-separated list, trimming each name.
///
/// Trailing empty entries (`a,b,`) are ignored. An empty entry before the
/// last name is an error, for the same reason as a blank line in
/// `classes.txt`: it would shift every following index.
pub fn split_class_list(raw: &str) -> Result<Vec<String>, ConvertError> {
    let entries: Vec<&str> = raw.split(',').map(str::trim).collect();
    let used = entries
        .iter()
        .rposition(|name| !name.is_empty())
        .map_or(0, |last| last + 1);

    let mut names = Vec::with_capacity(used);
    for (position, name) in entries[..used].iter().enumerate() {
        if name.is_empty() {
            return Err(ConvertError::InvalidClassList(format!(
                "entry {} of '{}' is empty",
                position + 1,
                raw
            )));
        }
        names.push(name.to_string());
    }

    Ok(names)
}
