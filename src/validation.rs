//! Client-side check of an [`EditableEntry`] against its termbase schema.
//!
//! The server stays authoritative; this only catches mistakes before a
//! round-trip (unknown languages or fields, a text value in a media field,
//! a media field without its upload).

use std::collections::HashSet;
use std::fmt;

use crate::error::{KalcError, KalcResult};
use crate::models::{
    EditableEntry, FieldGroup, FieldLevel, FieldType, SchemaDefinition, UploadFileModel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    TermbaseMismatch { entry: i32, schema: i32 },
    NoTerms,
    UnknownLanguage(i32),
    DuplicateLanguage(i32),
    EmptyTerm { language_id: i32 },
    UnknownField(String),
    WrongFieldLevel { name: String, expected: FieldLevel, found: FieldLevel },
    WrongFieldType { name: String, expected: FieldType, found: FieldType },
    MissingMediaFile { name: String, file_name: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::TermbaseMismatch { entry, schema } => {
                write!(f, "entry targets termbase #{entry} but the schema is for #{schema}")
            }
            ValidationIssue::NoTerms => write!(f, "entry has no term"),
            ValidationIssue::UnknownLanguage(id) => write!(f, "language #{id} is not in the termbase"),
            ValidationIssue::DuplicateLanguage(id) => write!(f, "language #{id} appears twice"),
            ValidationIssue::EmptyTerm { language_id } => {
                write!(f, "empty term in language #{language_id}")
            }
            ValidationIssue::UnknownField(name) => write!(f, "field '{name}' is not defined"),
            ValidationIssue::WrongFieldLevel { name, expected, found } => {
                write!(f, "field '{name}' belongs on {expected:?} level, found on {found:?} level")
            }
            ValidationIssue::WrongFieldType { name, expected, found } => {
                write!(f, "field '{name}' is {expected:?}, value is {found:?}")
            }
            ValidationIssue::MissingMediaFile { name, file_name } => {
                write!(f, "field '{name}' references '{file_name}' which is not uploaded")
            }
        }
    }
}

/// Collect every issue found in `entry`.
pub fn validate_entry(
    entry: &EditableEntry,
    schema: &SchemaDefinition,
    media_files: &[UploadFileModel],
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if entry.termbase_id != schema.termbase_id {
        issues.push(ValidationIssue::TermbaseMismatch {
            entry: entry.termbase_id,
            schema: schema.termbase_id,
        });
    }

    let uploads: HashSet<&str> = media_files.iter().map(|f| f.file_name.as_str()).collect();
    let check_fields = |fields: &[FieldGroup], level: FieldLevel, issues: &mut Vec<ValidationIssue>| {
        for field in fields {
            check_field(field, level, schema, &uploads, issues);
        }
    };

    check_fields(&entry.fields, FieldLevel::Entry, &mut issues);

    let mut seen = HashSet::new();
    for language in &entry.languages {
        if schema.language(language.language_id).is_none() {
            issues.push(ValidationIssue::UnknownLanguage(language.language_id));
        }
        if !seen.insert(language.language_id) {
            issues.push(ValidationIssue::DuplicateLanguage(language.language_id));
        }
        check_fields(&language.fields, FieldLevel::Language, &mut issues);
        for term in &language.terms {
            if term.term.trim().is_empty() {
                issues.push(ValidationIssue::EmptyTerm {
                    language_id: language.language_id,
                });
            }
            check_fields(&term.fields, FieldLevel::Term, &mut issues);
        }
    }

    if entry.languages.iter().all(|l| l.terms.is_empty()) {
        issues.push(ValidationIssue::NoTerms);
    }
    issues
}

/// Like [`validate_entry`], failing with [`KalcError::Validation`] on issues.
pub fn check_entry(
    entry: &EditableEntry,
    schema: &SchemaDefinition,
    media_files: &[UploadFileModel],
) -> KalcResult<()> {
    let issues = validate_entry(entry, schema, media_files);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(KalcError::Validation(issues))
    }
}

fn check_field(
    field: &FieldGroup,
    level: FieldLevel,
    schema: &SchemaDefinition,
    uploads: &HashSet<&str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(def) = schema.field(&field.name) else {
        issues.push(ValidationIssue::UnknownField(field.name.clone()));
        return;
    };
    if def.level != level {
        issues.push(ValidationIssue::WrongFieldLevel {
            name: field.name.clone(),
            expected: def.level,
            found: level,
        });
    }
    if let Some(found) = field.value.field_type() {
        if found != def.field_type {
            issues.push(ValidationIssue::WrongFieldType {
                name: field.name.clone(),
                expected: def.field_type,
                found,
            });
            return;
        }
    }
    if def.field_type == FieldType::Multimedia {
        let file_name = field.value.as_str();
        if !uploads.contains(file_name) {
            issues.push(ValidationIssue::MissingMediaFile {
                name: field.name.clone(),
                file_name: file_name.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldDefinition;
    use crate::models::LanguageGroupDefinition;

    fn schema() -> SchemaDefinition {
        SchemaDefinition {
            termbase_id: 5,
            termbase_name: "Kalcium".into(),
            language_group_definitions: vec![
                LanguageGroupDefinition { language_id: 1, language_name: "English".into() },
                LanguageGroupDefinition { language_id: 2, language_name: "German".into() },
            ],
            field_definitions: vec![
                FieldDefinition {
                    name: "Definition".into(),
                    field_type: FieldType::Text,
                    level: FieldLevel::Entry,
                },
                FieldDefinition {
                    name: "Image".into(),
                    field_type: FieldType::Multimedia,
                    level: FieldLevel::Entry,
                },
                FieldDefinition {
                    name: "Usage".into(),
                    field_type: FieldType::Text,
                    level: FieldLevel::Term,
                },
            ],
        }
    }

    #[test]
    fn valid_entry_with_media_passes() {
        let entry = EditableEntry::new(5)
            .with_term(1, "kettle")
            .with_field(FieldGroup::text("Definition", "boils water"))
            .with_field(FieldGroup::multimedia("Image", "kettle.png"));
        let files = vec![UploadFileModel::new("kettle.png", vec![0])];
        assert!(check_entry(&entry, &schema(), &files).is_ok());
    }

    #[test]
    fn reports_every_problem() {
        let mut entry = EditableEntry::new(6)
            .with_term(9, " ")
            .with_field(FieldGroup::text("Image", "not a file"))
            .with_field(FieldGroup::text("Colour", "red"))
            .with_field(FieldGroup::text("Usage", "informal"));
        entry.languages.push(entry.languages[0].clone());

        let issues = validate_entry(&entry, &schema(), &[]);
        assert!(issues.contains(&ValidationIssue::TermbaseMismatch { entry: 6, schema: 5 }));
        assert!(issues.contains(&ValidationIssue::UnknownLanguage(9)));
        assert!(issues.contains(&ValidationIssue::DuplicateLanguage(9)));
        assert!(issues.contains(&ValidationIssue::EmptyTerm { language_id: 9 }));
        assert!(issues.contains(&ValidationIssue::UnknownField("Colour".into())));
        assert!(issues.contains(&ValidationIssue::WrongFieldType {
            name: "Image".into(),
            expected: FieldType::Multimedia,
            found: FieldType::Text,
        }));
        assert!(issues.contains(&ValidationIssue::WrongFieldLevel {
            name: "Usage".into(),
            expected: FieldLevel::Term,
            found: FieldLevel::Entry,
        }));
    }

    #[test]
    fn media_field_needs_its_upload() {
        let entry = EditableEntry::new(5)
            .with_term(1, "kettle")
            .with_field(FieldGroup::multimedia("Image", "kettle.png"));
        let err = check_entry(&entry, &schema(), &[]).unwrap_err();
        match err {
            KalcError::Validation(issues) => assert_eq!(
                issues,
                vec![ValidationIssue::MissingMediaFile {
                    name: "Image".into(),
                    file_name: "kettle.png".into(),
                }]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn entry_without_terms_is_rejected() {
        let issues = validate_entry(&EditableEntry::new(5), &schema(), &[]);
        assert_eq!(issues, vec![ValidationIssue::NoTerms]);
    }
}
