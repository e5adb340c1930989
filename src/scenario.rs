//! Declarative test scenario run against a live Kalcium server.
//!
//! A [`Scenario`] is an ordered list of [`Step`]s. Each step calls the client
//! and checks its own post-conditions. Steps belong to a [`StepGroup`]: when a
//! step fails, the remaining steps of its group are skipped, a failed
//! `Connect` step skips everything, and the other groups carry on. Cleanup
//! steps still run after a failure while something they remove exists.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context as _, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::KalcError;
use crate::models::{
    distinct, AnalyzeType, AuthenticationData, CreateTermRequestModel, EditableEntry, Entry,
    EntryQueryFlags, FieldGroup, FieldType, MediaFileRequest, SchemaDefinition, SearchRequest,
    Segment, TaskId, TaskQueryFlags, Termbase, UploadFileModel,
};
use crate::KalcClient;

pub const DEFAULT_SEGMENT: &str = "Some sentence to analyze.";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
const DOWNLOAD_SIZE: u32 = 300;

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_segment() -> String {
    DEFAULT_SEGMENT.to_string()
}

/// One scenario step. Deserializable so a config file can list the steps,
/// e.g. `{ step = "search", term = "ket", max-count = 5 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum Step {
    Login,
    QueryTermbases,
    QuerySchemaDefinitions,
    Search {
        #[serde(default)]
        term: String,
        #[serde(default = "default_page_size")]
        max_count: u32,
    },
    CreateEntry,
    ReadBackEntry,
    DownloadMedia,
    DeleteEntry,
    CreateTermRequest,
    DeleteTermRequest,
    AnalyzeSegment {
        #[serde(default = "default_segment")]
        text: String,
    },
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepGroup {
    Connect,
    Terminology,
    Analysis,
    Teardown,
}

impl fmt::Display for StepGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StepGroup::Connect => "connect",
            StepGroup::Terminology => "terminology",
            StepGroup::Analysis => "analysis",
            StepGroup::Teardown => "teardown",
        })
    }
}

impl Step {
    /// Steps that remove what an earlier step created on the server. They
    /// run even after a failure in their group while there is something
    /// left to remove.
    pub fn is_cleanup(&self) -> bool {
        matches!(self, Step::DeleteEntry | Step::DeleteTermRequest)
    }

    pub fn group(&self) -> StepGroup {
        match self {
            Step::Login => StepGroup::Connect,
            Step::AnalyzeSegment { .. } => StepGroup::Analysis,
            Step::Logout => StepGroup::Teardown,
            _ => StepGroup::Terminology,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Login => f.write_str("Log in"),
            Step::QueryTermbases => f.write_str("Query available termbases"),
            Step::QuerySchemaDefinitions => f.write_str("Query termbase schema definitions"),
            Step::Search { term, max_count } => {
                write!(f, "Search for '{term}' (first {max_count} hits)")
            }
            Step::CreateEntry => f.write_str("Create entry"),
            Step::ReadBackEntry => f.write_str("Read created entry back"),
            Step::DownloadMedia => f.write_str("Download media attachment"),
            Step::DeleteEntry => f.write_str("Delete entry"),
            Step::CreateTermRequest => f.write_str("Create term request"),
            Step::DeleteTermRequest => f.write_str("Delete term request"),
            Step::AnalyzeSegment { text } => write!(f, "Analyze segment '{text}'"),
            Step::Logout => f.write_str("Log out"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: Step,
    pub status: StepStatus,
    /// Lines produced while running the step.
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioReport {
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    fn count(&self, pred: impl Fn(&StepStatus) -> bool) -> usize {
        self.steps.iter().filter(|r| pred(&r.status)).count()
    }

    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Passed))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Failed(_)))
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn status_of(&self, step: &Step) -> Option<&StepStatus> {
        self.steps.iter().find(|r| &r.step == step).map(|r| &r.status)
    }
}

/// Receives progress while a scenario runs.
pub trait ScenarioObserver {
    fn step_started(&mut self, step: &Step);
    fn step_finished(&mut self, report: &StepReport);
}

/// Inputs the steps need besides the client.
#[derive(Debug, Clone)]
pub struct ScenarioSettings {
    pub user_name: String,
    pub password: String,
    /// Termbase the terminology steps work in.
    pub termbase_name: String,
    /// Image attached to the created entry when the schema has a
    /// multimedia field. Missing file: the media field is left out.
    pub sample_media: Option<PathBuf>,
    pub download_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(steps: Vec<Step>) -> Self {
        Scenario { steps }
    }

    /// Every step, in the order the API is exercised end to end.
    pub fn standard() -> Self {
        Scenario::new(vec![
            Step::Login,
            Step::QueryTermbases,
            Step::QuerySchemaDefinitions,
            Step::Search {
                term: String::new(),
                max_count: DEFAULT_PAGE_SIZE,
            },
            Step::CreateEntry,
            Step::ReadBackEntry,
            Step::DownloadMedia,
            Step::DeleteEntry,
            Step::CreateTermRequest,
            Step::DeleteTermRequest,
            Step::AnalyzeSegment {
                text: default_segment(),
            },
            Step::Logout,
        ])
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub async fn run(
        &self,
        client: &KalcClient,
        settings: &ScenarioSettings,
        observer: &mut dyn ScenarioObserver,
    ) -> ScenarioReport {
        let mut runner = Runner {
            client,
            settings,
            state: RunState::default(),
        };
        let mut failed_groups = HashSet::new();
        let mut report = ScenarioReport::default();

        for step in &self.steps {
            observer.step_started(step);
            let group = step.group();
            let mut notes = Vec::new();
            let status = if failed_groups.contains(&StepGroup::Connect) {
                StepStatus::Skipped("not connected".to_string())
            } else if failed_groups.contains(&group) && !(step.is_cleanup() && runner.has_cleanup_work(step)) {
                StepStatus::Skipped(format!("an earlier {group} step failed"))
            } else {
                match runner.execute(step, &mut notes).await {
                    Ok(Outcome::Done) => StepStatus::Passed,
                    Ok(Outcome::Skipped(reason)) => StepStatus::Skipped(reason),
                    Err(error) => {
                        failed_groups.insert(group);
                        StepStatus::Failed(describe_error(&error))
                    }
                }
            };
            info!(step = %step, ?status, "scenario step finished");

            let step_report = StepReport {
                step: step.clone(),
                status,
                notes,
            };
            observer.step_finished(&step_report);
            report.steps.push(step_report);
        }
        report
    }
}

/// Render a step failure; API errors use the server's message.
pub fn describe_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<KalcError>().and_then(KalcError::api_error) {
        Some(api) => format!("ERROR [{}] {}", api.status_code, api.message()),
        None => format!("{error:#}"),
    }
}

enum Outcome {
    Done,
    Skipped(String),
}

fn skipped(reason: &str) -> Result<Outcome> {
    Ok(Outcome::Skipped(reason.to_string()))
}

/// Results earlier steps hand to later ones.
#[derive(Default)]
struct RunState {
    termbases: BTreeMap<i32, Termbase>,
    schemas: BTreeMap<i32, SchemaDefinition>,
    submitted: Option<EditableEntry>,
    created: Option<Entry>,
    read_back: Option<Entry>,
    term_request: Option<TaskId>,
}

struct Runner<'a> {
    client: &'a KalcClient,
    settings: &'a ScenarioSettings,
    state: RunState,
}

impl Runner<'_> {
    fn has_cleanup_work(&self, step: &Step) -> bool {
        match step {
            Step::DeleteEntry => self.state.created.is_some(),
            Step::DeleteTermRequest => self.state.term_request.is_some(),
            _ => false,
        }
    }

    async fn execute(&mut self, step: &Step, notes: &mut Vec<String>) -> Result<Outcome> {
        match step {
            Step::Login => self.login(notes).await,
            Step::QueryTermbases => self.query_termbases(notes).await,
            Step::QuerySchemaDefinitions => self.query_schema_definitions(notes).await,
            Step::Search { term, max_count } => self.search(term, *max_count, notes).await,
            Step::CreateEntry => self.create_entry(notes).await,
            Step::ReadBackEntry => self.read_back_entry(notes).await,
            Step::DownloadMedia => self.download_media(notes).await,
            Step::DeleteEntry => self.delete_entry(notes).await,
            Step::CreateTermRequest => self.create_term_request(notes).await,
            Step::DeleteTermRequest => self.delete_term_request(notes).await,
            Step::AnalyzeSegment { text } => self.analyze_segment(text, notes).await,
            Step::Logout => self.logout(notes).await,
        }
    }

    async fn authentication_data(&self) -> Result<AuthenticationData> {
        self.client
            .authentication_data()
            .await
            .ok_or(KalcError::NotAuthenticated)
            .context("no active session")
    }

    fn test_termbase(&self) -> Result<Termbase> {
        let name = &self.settings.termbase_name;
        self.state
            .termbases
            .values()
            .find(|tb| &tb.name == name)
            .cloned()
            .with_context(|| format!("termbase '{name}' is not among the enabled termbases"))
    }

    fn schema(&self, termbase_id: i32) -> Result<SchemaDefinition> {
        self.state
            .schemas
            .get(&termbase_id)
            .cloned()
            .with_context(|| format!("no schema definition loaded for termbase #{termbase_id}"))
    }

    fn language_ids(&self, termbase_id: i32) -> Vec<i32> {
        self.state
            .termbases
            .get(&termbase_id)
            .map(|tb| tb.language_ids.clone())
            .unwrap_or_default()
    }

    async fn login(&mut self, notes: &mut Vec<String>) -> Result<Outcome> {
        let user = &self.settings.user_name;
        notes.push(format!(
            "Connecting to Kalcium REST API on address {}",
            self.client.backend_url()
        ));
        let data = self.client.login(user, &self.settings.password).await?;
        notes.push(format!(
            "Successfully logged in with user {user} ({} groups)",
            data.groups.len()
        ));
        Ok(Outcome::Done)
    }

    async fn query_termbases(&mut self, notes: &mut Vec<String>) -> Result<Outcome> {
        let ids = self.authentication_data().await?.enabled_termbase_ids();
        let termbases = self.client.terminology().get_termbases(ids).await?;
        for tb in &termbases {
            notes.push(format!(" > Termbase '{}' [#{}] found", tb.name, tb.id));
        }
        self.state.termbases = termbases.into_iter().map(|tb| (tb.id, tb)).collect();
        Ok(Outcome::Done)
    }

    async fn query_schema_definitions(&mut self, notes: &mut Vec<String>) -> Result<Outcome> {
        let ids = self.authentication_data().await?.enabled_termbase_ids();
        let definitions = self.client.terminology().get_termbase_definitions(ids).await?;
        for def in &definitions {
            notes.push(format!(
                " > Definition for termbase '{}' [#{}] found",
                def.termbase_name, def.termbase_id
            ));
        }
        self.state.schemas = definitions
            .into_iter()
            .map(|def| (def.termbase_id, def))
            .collect();
        Ok(Outcome::Done)
    }

    async fn search(&mut self, term: &str, max_count: u32, notes: &mut Vec<String>) -> Result<Outcome> {
        let termbase = self.test_termbase()?;
        let request =
            SearchRequest::in_termbase(term, termbase.id, &termbase.language_ids).page(0, max_count);
        let result = self.client.search().search(&request).await?;
        notes.push(format!(" > Total number of matches: {}", result.total));
        notes.push(format!(" > Number of hits returned: {}", result.hits.len()));
        notes.push(format!(" > Number of related entries: {}", result.entries.len()));

        ensure!(
            result.hits.len() <= max_count as usize,
            "{} hits returned for a page of {max_count}",
            result.hits.len()
        );
        ensure!(
            result.total >= result.hits.len() as u64,
            "total {} is smaller than the page of {} hits",
            result.total,
            result.hits.len()
        );
        Ok(Outcome::Done)
    }

    async fn create_entry(&mut self, notes: &mut Vec<String>) -> Result<Outcome> {
        let termbase = self.test_termbase()?;
        let schema = self.schema(termbase.id)?;
        let language = schema
            .language_group_definitions
            .first()
            .context("termbase schema defines no language")?;
        let term = format!(
            "test term in termbase {}, language {}",
            termbase.name, language.language_name
        );
        notes.push(format!(
            " > Adding term to language {} (#{}): '{term}'",
            language.language_name, language.language_id
        ));
        let mut entry = EditableEntry::new(termbase.id).with_term(language.language_id, term);

        if let Some(def) = schema.first_entry_field(FieldType::Text) {
            let value = "sample text field content";
            notes.push(format!(
                " > Adding entry level text field, field name: {}; value: {value}",
                def.name
            ));
            entry = entry.with_field(FieldGroup::text(&def.name, value));
        }

        let mut media_files = Vec::new();
        if let Some(def) = schema.first_entry_field(FieldType::Multimedia) {
            match self.sample_media().await {
                Some(path) => {
                    let upload = UploadFileModel::load(&path)
                        .await
                        .with_context(|| format!("reading {}", path.display()))?;
                    notes.push(format!(" > Adding media field {}: {}", def.name, upload.file_name));
                    entry = entry.with_field(FieldGroup::multimedia(&def.name, &upload.file_name));
                    media_files.push(upload);
                }
                None => notes.push(format!(" > No sample media file, media field {} left out", def.name)),
            }
        }

        let created = self
            .client
            .terminology()
            .create_entry_checked(&entry, &schema, &media_files)
            .await?;
        ensure!(!created.uuid().is_empty(), "created entry has no id");
        notes.push(format!(" > Entry created with id #{}", created.uuid()));
        let pretty = serde_json::to_string_pretty(&created);
        self.state.submitted = Some(entry);
        self.state.created = Some(created);
        self.state.read_back = None;
        notes.push(pretty?);
        Ok(Outcome::Done)
    }

    async fn sample_media(&self) -> Option<PathBuf> {
        let path = self.settings.sample_media.as_ref()?;
        match tokio::fs::try_exists(path).await {
            Ok(true) => Some(path.clone()),
            _ => None,
        }
    }

    async fn read_back_entry(&mut self, notes: &mut Vec<String>) -> Result<Outcome> {
        let (Some(created), Some(submitted)) = (&self.state.created, &self.state.submitted) else {
            return skipped("no entry was created");
        };
        let termbase_id = created.id.termbase_id;
        let uuid = created.uuid().to_string();

        let result = self
            .client
            .terminology()
            .get_entries_by_uuid(
                termbase_id,
                &[uuid.clone()],
                &self.language_ids(termbase_id),
                EntryQueryFlags::default(),
            )
            .await?;
        let mut entry = result
            .find(&uuid)
            .cloned()
            .with_context(|| format!("entry #{uuid} was not returned"))?;
        if let Some(schema) = self.state.schemas.get(&termbase_id) {
            entry.resolve_fields(schema);
        }
        ensure!(
            submitted.matches(&entry),
            "entry #{uuid} read back differs from what was submitted"
        );
        notes.push(format!(" > Entry #{uuid} has been queried again"));
        notes.push(serde_json::to_string_pretty(&entry)?);
        self.state.read_back = Some(entry);
        Ok(Outcome::Done)
    }

    async fn download_media(&mut self, notes: &mut Vec<String>) -> Result<Outcome> {
        let Some(entry) = &self.state.read_back else {
            return skipped("entry was not read back");
        };
        let Some(file_name) = entry.media_file_names().last() else {
            return skipped("entry has no media field");
        };

        let request = MediaFileRequest::new(entry.id.termbase_id, file_name)
            .entry(entry.uuid())
            .resized(DOWNLOAD_SIZE, DOWNLOAD_SIZE);
        let bytes = self.client.terminology().get_media_file(&request).await?;
        ensure!(!bytes.is_empty(), "media file '{file_name}' is empty");

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let target = self
            .settings
            .download_dir
            .join(format!("{}{extension}", Uuid::new_v4()));
        tokio::fs::write(&target, &bytes)
            .await
            .with_context(|| format!("writing {}", target.display()))?;
        notes.push(format!(
            " >> Image attachment has been downloaded to {}",
            target.display()
        ));
        Ok(Outcome::Done)
    }

    async fn delete_entry(&mut self, notes: &mut Vec<String>) -> Result<Outcome> {
        let Some(created) = self.state.created.take() else {
            return skipped("no entry was created");
        };
        let uuid = created.uuid().to_string();
        let termbase_id = created.id.termbase_id;
        notes.push(format!("Deleting entry {uuid}"));
        self.client.terminology().delete_entry(&uuid, termbase_id).await?;
        notes.push(format!(" > Entry {uuid} has been deleted"));

        let lookup = self
            .client
            .terminology()
            .get_entries_by_uuid(
                termbase_id,
                &[uuid.clone()],
                &self.language_ids(termbase_id),
                EntryQueryFlags::default(),
            )
            .await;
        match lookup {
            Ok(result) => ensure!(
                result.find(&uuid).is_none(),
                "deleted entry #{uuid} is still returned"
            ),
            Err(error) if error.is_not_found() => {}
            Err(error) => return Err(error.into()),
        }
        Ok(Outcome::Done)
    }

    async fn create_term_request(&mut self, notes: &mut Vec<String>) -> Result<Outcome> {
        let termbase = self.test_termbase()?;
        let schema = self.schema(termbase.id)?;
        let language = schema
            .language_group_definitions
            .first()
            .context("termbase schema defines no language")?;
        let content = EditableEntry::new(termbase.id).with_term(
            language.language_id,
            format!(
                "test term request in termbase {}, language {}",
                termbase.name, language.language_name
            ),
        );
        let model = CreateTermRequestModel::from_entry(
            content,
            Some("This is a sample term request".to_string()),
        )
        .context("term request has no term")?;

        let id = self
            .client
            .term_requests()
            .create_term_request(&model, &[])
            .await?;
        notes.push(format!(" > Term request #{id} created"));
        self.state.term_request = Some(id);

        let requests = self
            .client
            .term_requests()
            .get_tasks_by_id(&[id], TaskQueryFlags::default())
            .await?;
        ensure!(
            requests.len() == 1 && requests[0].id == id,
            "term request #{id} was not returned exactly once"
        );
        let request = &requests[0];
        ensure!(
            request.source_expression == model.source_expression,
            "term request #{id} has source '{}', expected '{}'",
            request.source_expression,
            model.source_expression
        );
        Ok(Outcome::Done)
    }

    async fn delete_term_request(&mut self, notes: &mut Vec<String>) -> Result<Outcome> {
        let Some(id) = self.state.term_request.take() else {
            return skipped("no term request was created");
        };
        notes.push(format!("Deleting term request {id}"));
        self.client.base_tasks().delete(&[id]).await?;
        notes.push(format!(" > Term request {id} has been deleted"));

        match self
            .client
            .term_requests()
            .get_tasks_by_id(&[id], TaskQueryFlags::default())
            .await
        {
            Ok(remaining) => ensure!(
                remaining.iter().all(|t| t.id != id),
                "deleted term request #{id} is still returned"
            ),
            Err(error) if error.is_not_found() => {}
            Err(error) => return Err(error.into()),
        }
        Ok(Outcome::Done)
    }

    async fn analyze_segment(&mut self, text: &str, notes: &mut Vec<String>) -> Result<Outcome> {
        let data = self.authentication_data().await?;
        if !data.is_check_term_enabled() {
            return skipped("CT module is not enabled for the user");
        }
        let Some(&profile_id) = data.analysis_profile_ids().first() else {
            return skipped("No Analysis profile is enabled for the user");
        };

        let profile = self
            .client
            .analysis_profiles()
            .get_analysis_profile(profile_id)
            .await?;
        let termbases = self
            .client
            .terminology()
            .get_termbases(profile.termbase_ids())
            .await?;
        let all_language_ids = distinct(termbases.iter().flat_map(|tb| tb.language_ids.iter().copied()));
        let Some(&source_language) = all_language_ids.first() else {
            return skipped("the profile's termbases have no language");
        };
        let languages = self
            .client
            .terminology()
            .get_languages(all_language_ids.clone())
            .await?;
        let target_languages: Vec<i32> = match languages.iter().find(|l| l.code == "en-US") {
            Some(english) => vec![english.id],
            None => all_language_ids.iter().skip(1).take(1).copied().filter(|id| *id > 0).collect(),
        };

        let segment = Segment {
            id: Some("UNIQUE-ID".to_string()),
            index: Some(0),
            ..Segment::source(text)
        };
        let result = self
            .client
            .analysis()
            .analyze_segment(
                &segment,
                profile_id,
                &[source_language],
                &target_languages,
                AnalyzeType::Source,
            )
            .await?;
        notes.push(format!(
            " > Profile '{}' [#{}] returned {} result pairs",
            profile.name,
            profile.id,
            result.analyze_result_pairs.len()
        ));
        for flagged in result.problematical() {
            notes.push(format!("Problematical hit is found '{}'", flagged.searched));
        }
        Ok(Outcome::Done)
    }

    async fn logout(&mut self, notes: &mut Vec<String>) -> Result<Outcome> {
        self.client.logout().await?;
        notes.push("Successfully logged out".to_string());
        Ok(Outcome::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct StepList {
        steps: Vec<Step>,
    }

    #[test]
    fn steps_parse_from_toml() {
        let list: StepList = toml::from_str(
            r#"
            steps = [
                { step = "login" },
                { step = "search", term = "ket", max-count = 5 },
                { step = "search" },
                { step = "analyze-segment" },
                { step = "logout" },
            ]
            "#,
        )
        .unwrap();
        assert_eq!(
            list.steps,
            vec![
                Step::Login,
                Step::Search { term: "ket".into(), max_count: 5 },
                Step::Search { term: String::new(), max_count: DEFAULT_PAGE_SIZE },
                Step::AnalyzeSegment { text: DEFAULT_SEGMENT.into() },
                Step::Logout,
            ]
        );
    }

    #[test]
    fn standard_scenario_starts_with_login_and_ends_with_logout() {
        let scenario = Scenario::standard();
        assert_eq!(scenario.steps().first(), Some(&Step::Login));
        assert_eq!(scenario.steps().last(), Some(&Step::Logout));
        assert_eq!(
            scenario.steps().iter().filter(|s| s.group() == StepGroup::Analysis).count(),
            1
        );
    }

    #[test]
    fn api_errors_are_described_with_server_message() {
        let api = crate::error::ApiError::from_body(
            409,
            "Conflict",
            br#"{"statusCode":409,"shortMessage":"Entry is locked"}"#,
        );
        let error = anyhow::Error::new(KalcError::Api(api)).context("deleting entry");
        assert_eq!(describe_error(&error), "ERROR [409] Entry is locked");

        let error = anyhow::anyhow!("termbase 'Kalcium' is not among the enabled termbases");
        assert_eq!(
            describe_error(&error),
            "termbase 'Kalcium' is not among the enabled termbases"
        );
    }
}
