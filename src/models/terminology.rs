use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named multilingual terminology database.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Termbase {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub language_ids: Vec<i32>,
    #[serde(default)]
    pub schema_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: i32,
    /// Culture code such as `en-US`.
    pub code: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Multimedia,
    Picklist,
    Date,
    Number,
    #[serde(other)]
    Other,
}

/// Where in an entry a field may appear.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldLevel {
    #[default]
    Entry,
    Language,
    Term,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub level: FieldLevel,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageGroupDefinition {
    pub language_id: i32,
    #[serde(default)]
    pub language_name: String,
}

/// Structure of one termbase: which languages and fields an entry may hold.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
    pub termbase_id: i32,
    #[serde(default)]
    pub termbase_name: String,
    #[serde(default)]
    pub language_group_definitions: Vec<LanguageGroupDefinition>,
    #[serde(default)]
    pub field_definitions: Vec<FieldDefinition>,
}

impl SchemaDefinition {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.field_definitions.iter().find(|f| f.name == name)
    }

    pub fn language(&self, language_id: i32) -> Option<&LanguageGroupDefinition> {
        self.language_group_definitions
            .iter()
            .find(|l| l.language_id == language_id)
    }

    /// First entry-level field of the given type.
    pub fn first_entry_field(&self, field_type: FieldType) -> Option<&FieldDefinition> {
        self.field_definitions
            .iter()
            .find(|f| f.field_type == field_type && f.level == FieldLevel::Entry)
    }
}

/// Value of a field group.
///
/// On the wire every value is a plain string. Values decoded from the server
/// start out `Raw` and become `Text` or `Multimedia` once resolved against the
/// termbase's `SchemaDefinition`. A `Multimedia` value is the file name of an
/// uploaded media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Multimedia(String),
    Raw(String),
}

impl FieldValue {
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(v) | FieldValue::Multimedia(v) | FieldValue::Raw(v) => v,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            FieldValue::Text(v) | FieldValue::Multimedia(v) | FieldValue::Raw(v) => v,
        }
    }

    /// Type implied by the variant, `None` while still raw.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            FieldValue::Text(_) => Some(FieldType::Text),
            FieldValue::Multimedia(_) => Some(FieldType::Multimedia),
            FieldValue::Raw(_) => None,
        }
    }

    pub fn resolve(self, field_type: FieldType) -> FieldValue {
        let raw = self.into_string();
        match field_type {
            FieldType::Text => FieldValue::Text(raw),
            FieldType::Multimedia => FieldValue::Multimedia(raw),
            _ => FieldValue::Raw(raw),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(FieldValue::Raw(
            Option::<String>::deserialize(deserializer)?.unwrap_or_default(),
        ))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldGroup {
    pub name: String,
    pub value: FieldValue,
}

impl FieldGroup {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FieldGroup {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        }
    }

    /// Field referencing a media file uploaded alongside the entry.
    pub fn multimedia(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        FieldGroup {
            name: name.into(),
            value: FieldValue::Multimedia(file_name.into()),
        }
    }

    fn resolve(&mut self, schema: &SchemaDefinition) {
        if let Some(def) = schema.field(&self.name) {
            let value = std::mem::replace(&mut self.value, FieldValue::Raw(String::new()));
            self.value = value.resolve(def.field_type);
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntryId {
    #[serde(alias = "UUID")]
    pub uuid: String,
    pub termbase_id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TermGroup {
    #[serde(default)]
    pub id: Option<String>,
    pub term: String,
    #[serde(default)]
    pub fields: Vec<FieldGroup>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageGroup {
    pub language_id: i32,
    #[serde(default)]
    pub terms: Vec<TermGroup>,
    #[serde(default)]
    pub fields: Vec<FieldGroup>,
}

/// A persisted terminology record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub termbase_id: i32,
    #[serde(default)]
    pub languages: Vec<LanguageGroup>,
    #[serde(default)]
    pub fields: Vec<FieldGroup>,
}

impl Entry {
    pub fn uuid(&self) -> &str {
        &self.id.uuid
    }

    /// Type every field value according to the termbase schema. Fields the
    /// schema does not know stay raw.
    pub fn resolve_fields(&mut self, schema: &SchemaDefinition) {
        self.fields.iter_mut().for_each(|f| f.resolve(schema));
        for language in &mut self.languages {
            language.fields.iter_mut().for_each(|f| f.resolve(schema));
            for term in &mut language.terms {
                term.fields.iter_mut().for_each(|f| f.resolve(schema));
            }
        }
    }

    /// Entry-level multimedia values, after `resolve_fields`.
    pub fn media_file_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| match &f.value {
            FieldValue::Multimedia(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditableTermGroup {
    pub term: String,
    #[serde(default)]
    pub fields: Vec<FieldGroup>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditableLanguageGroup {
    pub language_id: i32,
    #[serde(default)]
    pub terms: Vec<EditableTermGroup>,
    #[serde(default)]
    pub fields: Vec<FieldGroup>,
}

/// Draft of an entry, sent on create and embedded in term requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditableEntry {
    pub termbase_id: i32,
    #[serde(default)]
    pub languages: Vec<EditableLanguageGroup>,
    #[serde(default)]
    pub fields: Vec<FieldGroup>,
}

impl EditableEntry {
    pub fn new(termbase_id: i32) -> Self {
        EditableEntry {
            termbase_id,
            ..Default::default()
        }
    }

    /// Add a term, creating the language group on first use.
    pub fn with_term(mut self, language_id: i32, term: impl Into<String>) -> Self {
        let term = EditableTermGroup {
            term: term.into(),
            fields: Vec::new(),
        };
        match self.languages.iter_mut().find(|l| l.language_id == language_id) {
            Some(language) => language.terms.push(term),
            None => self.languages.push(EditableLanguageGroup {
                language_id,
                terms: vec![term],
                fields: Vec::new(),
            }),
        }
        self
    }

    pub fn with_field(mut self, field: FieldGroup) -> Self {
        self.fields.push(field);
        self
    }

    /// First term of the first language group.
    pub fn first_term(&self) -> Option<(i32, &str)> {
        self.languages.iter().find_map(|l| {
            l.terms
                .first()
                .map(|t| (l.language_id, t.term.as_str()))
        })
    }

    /// True if `entry` holds the same languages, terms and field values as
    /// this draft. Server-assigned ids and extra empty groups are ignored.
    pub fn matches(&self, entry: &Entry) -> bool {
        if self.termbase_id != entry.termbase_id || !same_fields(&self.fields, &entry.fields) {
            return false;
        }
        let stored: Vec<_> = entry
            .languages
            .iter()
            .filter(|l| !l.terms.is_empty() || !l.fields.is_empty())
            .collect();
        stored.len() == self.languages.len()
            && self.languages.iter().all(|draft| {
                stored
                    .iter()
                    .find(|l| l.language_id == draft.language_id)
                    .is_some_and(|l| {
                        same_fields(&draft.fields, &l.fields)
                            && draft.terms.len() == l.terms.len()
                            && draft.terms.iter().zip(&l.terms).all(|(d, s)| {
                                d.term == s.term && same_fields(&d.fields, &s.fields)
                            })
                    })
            })
    }
}

fn same_fields(draft: &[FieldGroup], stored: &[FieldGroup]) -> bool {
    draft.len() == stored.len()
        && draft
            .iter()
            .zip(stored)
            .all(|(d, s)| d.name == s.name && d.value.as_str() == s.value.as_str())
}

/// Projection flags for bulk entry reads.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntryQueryFlags {
    pub include_history: bool,
    pub include_statistics: bool,
    pub include_fields: bool,
    /// Only return the requested languages' term groups.
    pub partial: bool,
    pub resolve_cross_references: bool,
}

impl Default for EntryQueryFlags {
    fn default() -> Self {
        EntryQueryFlags {
            include_history: false,
            include_statistics: false,
            include_fields: true,
            partial: false,
            resolve_cross_references: false,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EntriesQuery<'a> {
    pub uuids: &'a [String],
    pub language_ids: &'a [i32],
    #[serde(flatten)]
    pub flags: EntryQueryFlags,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntriesResult {
    #[serde(default)]
    pub entries: Vec<Entry>,
    /// Requested UUIDs the server could not find.
    #[serde(default)]
    pub not_found: Vec<String>,
}

impl EntriesResult {
    pub fn find(&self, uuid: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id.uuid == uuid)
    }
}

/// Parameters of a media download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFileRequest {
    pub termbase_id: i32,
    pub file_name: String,
    pub thumbnail: bool,
    /// History version to read instead of the current file.
    pub version: Option<i32>,
    pub entry_uuid: Option<String>,
    pub term_id: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl MediaFileRequest {
    pub fn new(termbase_id: i32, file_name: impl Into<String>) -> Self {
        MediaFileRequest {
            termbase_id,
            file_name: file_name.into(),
            thumbnail: false,
            version: None,
            entry_uuid: None,
            term_id: None,
            width: None,
            height: None,
        }
    }

    pub fn entry(mut self, uuid: impl Into<String>) -> Self {
        self.entry_uuid = Some(uuid.into());
        self
    }

    /// Ask the server to scale the image to fit `width` x `height`.
    pub fn resized(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("fileName", self.file_name.clone()),
            ("thumbnail", self.thumbnail.to_string()),
        ];
        let optional = [
            ("version", self.version.map(|v| v.to_string())),
            ("entryUuid", self.entry_uuid.clone()),
            ("termId", self.term_id.clone()),
            ("width", self.width.map(|v| v.to_string())),
            ("height", self.height.map(|v| v.to_string())),
        ];
        pairs.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        );
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> SchemaDefinition {
        serde_json::from_value(json!({
            "termbaseId": 5,
            "termbaseName": "Kalcium",
            "languageGroupDefinitions": [
                {"languageId": 1, "languageName": "English"},
                {"languageId": 2, "languageName": "German"}
            ],
            "fieldDefinitions": [
                {"name": "Definition", "fieldType": "Text", "level": "Entry"},
                {"name": "Image", "fieldType": "Multimedia"},
                {"name": "Status", "fieldType": "Picklist", "level": "Term"},
                {"name": "Created", "fieldType": "DateTime"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn schema_decodes_unknown_field_types_as_other() {
        let schema = schema();
        assert_eq!(schema.field("Created").unwrap().field_type, FieldType::Other);
        assert_eq!(schema.field("Image").unwrap().level, FieldLevel::Entry);
        assert_eq!(
            schema.first_entry_field(FieldType::Multimedia).unwrap().name,
            "Image"
        );
        assert!(schema.first_entry_field(FieldType::Picklist).is_none());
    }

    #[test]
    fn field_values_serialize_as_plain_strings() {
        let entry = EditableEntry::new(5)
            .with_term(1, "kettle")
            .with_field(FieldGroup::text("Definition", "boils water"))
            .with_field(FieldGroup::multimedia("Image", "kettle.png"));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["fields"][0], json!({"name": "Definition", "value": "boils water"}));
        assert_eq!(value["fields"][1]["value"], "kettle.png");
        assert_eq!(value["languages"][0]["terms"][0]["term"], "kettle");
    }

    #[test]
    fn entry_fields_resolve_against_schema() {
        let mut entry: Entry = serde_json::from_value(json!({
            "id": {"uuid": "a-1", "termbaseId": 5},
            "termbaseId": 5,
            "languages": [{
                "languageId": 1,
                "terms": [{"term": "kettle", "fields": [{"name": "Status", "value": "approved"}]}]
            }],
            "fields": [
                {"name": "Definition", "value": "boils water"},
                {"name": "Image", "value": "kettle.png"},
                {"name": "Legacy", "value": null}
            ]
        }))
        .unwrap();
        assert_eq!(entry.fields[0].value, FieldValue::Raw("boils water".into()));

        entry.resolve_fields(&schema());
        assert_eq!(entry.fields[0].value, FieldValue::Text("boils water".into()));
        assert_eq!(entry.fields[2].value, FieldValue::Raw(String::new()));
        assert_eq!(entry.media_file_names().collect::<Vec<_>>(), vec!["kettle.png"]);
        assert_eq!(
            entry.languages[0].terms[0].fields[0].value,
            FieldValue::Raw("approved".into())
        );
    }

    #[test]
    fn draft_matches_stored_entry_ignoring_ids() {
        let draft = EditableEntry::new(5)
            .with_term(1, "kettle")
            .with_term(1, "tea kettle")
            .with_field(FieldGroup::text("Definition", "boils water"));
        let stored: Entry = serde_json::from_value(json!({
            "id": {"uuid": "a-1", "termbaseId": 5},
            "termbaseId": 5,
            "languages": [
                {"languageId": 1, "terms": [
                    {"id": "t1", "term": "kettle"},
                    {"id": "t2", "term": "tea kettle"}
                ]},
                {"languageId": 2, "terms": []}
            ],
            "fields": [{"name": "Definition", "value": "boils water"}]
        }))
        .unwrap();
        assert!(draft.matches(&stored));

        let changed = draft.clone().with_term(2, "Wasserkocher");
        assert!(!changed.matches(&stored));
    }

    #[test]
    fn media_request_only_sends_set_parameters() {
        let request = MediaFileRequest::new(5, "kettle.png")
            .entry("a-1")
            .resized(300, 300);
        let pairs = request.query_pairs();
        assert_eq!(pairs[0], ("fileName", "kettle.png".to_string()));
        assert!(pairs.contains(&("width", "300".to_string())));
        assert!(pairs.contains(&("entryUuid", "a-1".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "version" || *k == "termId"));
    }
}
