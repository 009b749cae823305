//! # Contract scenario suite
//!
//! The fixed matrix of live checks against the search endpoint. Each
//! [`Scenario`] names a request ([`Target`]) and what the reply must look
//! like ([`Expectation`]). [`run_suite`] runs them one after another and
//! collects a [`SuiteReport`].
//!
//! A transport failure fails only the scenario that hit it.

use chrono::{DateTime, Utc};
use hero_core::{Hero, HeroSearchResponse};
use hero_schema::ErrorShape;
use serde::Serialize;

use crate::{ApiReply, ClientError, SuperheroClient};

/// The request a scenario sends.
#[derive(Debug, Clone, Copy)]
pub enum Target {
    /// Search `name` with the configured token.
    Name(&'static str),
    /// Search `name` with `token` instead of the configured one.
    Token { token: &'static str, name: &'static str },
    /// Search with the configured token and a possibly absent name segment.
    Segment(Option<&'static str>),
}

/// What a reply must satisfy.
#[derive(Debug, Clone, Copy)]
pub enum Expectation {
    /// Status 200, `results` present, some hero name contains the
    /// substring (case-insensitive).
    NameContains(&'static str),
    /// Body is `NotFound` or `BadNameRequest`.
    NotFound,
    /// Body is `AccessDenied`.
    AccessDenied,
    /// Status 200, body validates, `response` is `"success"`, at least one
    /// hero.
    Success,
    /// Body validates and every hero passes the field-level checks.
    AllHeroesValid,
}

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub id: &'static str,
    pub target: Target,
    pub expect: Expectation,
}

impl Scenario {
    /// The part of the id before the first `/`, e.g. `not_found`.
    pub fn group(&self) -> &'static str {
        self.id.split_once('/').map_or(self.id, |(group, _)| group)
    }

    /// True when `filter` names this scenario's group or is a prefix of
    /// its id.
    pub fn matches(&self, filter: &str) -> bool {
        self.group() == filter || self.id.starts_with(filter)
    }
}

/// Scenarios from [`SCENARIOS`] selected by [`Scenario::matches`].
pub fn select(filter: &str) -> Vec<&'static Scenario> {
    SCENARIOS.iter().filter(|s| s.matches(filter)).collect()
}

const fn name(id: &'static str, name: &'static str, expect: Expectation) -> Scenario {
    Scenario {
        id,
        target: Target::Name(name),
        expect,
    }
}

const fn token(id: &'static str, token: &'static str) -> Scenario {
    Scenario {
        id,
        target: Target::Token { token, name: "Batman" },
        expect: Expectation::AccessDenied,
    }
}

const fn segment(id: &'static str, segment: Option<&'static str>) -> Scenario {
    Scenario {
        id,
        target: Target::Segment(segment),
        expect: Expectation::NotFound,
    }
}

/// The full matrix, in execution order.
pub static SCENARIOS: &[Scenario] = &[
    name("valid_name/batman", "Batman", Expectation::NameContains("Batman")),
    name("valid_name/iron_man", "Iron Man", Expectation::NameContains("Iron Man")),
    name("valid_name/black_panther", "Black Panther", Expectation::NameContains("Panther")),
    name("not_found/no_such_name", "NonExistentHeroNameXYZ", Expectation::NotFound),
    name("not_found/empty_string", "", Expectation::NotFound),
    name("not_found/digits_only", "1234567890", Expectation::NotFound),
    name("not_found/emojis", "\u{1F600}\u{1F602}\u{1F923}", Expectation::NotFound),
    name("not_found/spaces_only", "       ", Expectation::NotFound),
    name("not_found/special_symbols", "!@#$%^&*()", Expectation::NotFound),
    name("special_name/special_chars", "!@#$%^&*()_+-=[]{};':,./<>?", Expectation::NotFound),
    name("special_name/special_ascii", "test!@#", Expectation::NotFound),
    name("special_name/unicode_chars", "\u{540D}\u{524D}", Expectation::NotFound),
    name("special_name/underscore", "John_Doe", Expectation::NotFound),
    name("special_name/hyphens", "Name-With-Hyphens", Expectation::NotFound),
    token("invalid_token/all_zeroes", "0000000000000000"),
    token("invalid_token/random_string", "invalidtoken12345"),
    token("invalid_token/empty_token", ""),
    token("invalid_token/null_token", "null"),
    token("invalid_token/special_chars_token", "@#$%^&*"),
    segment("name_segment/segment_none", None),
    segment("name_segment/segment_empty", Some("")),
    segment("name_segment/segment_spaces", Some("   ")),
    segment("name_segment/segment_special_chars", Some("!@#")),
    name("field_validation/search_hero_success", "Batman", Expectation::Success),
    name("field_validation/field_level_validation", "Superman", Expectation::AllHeroesValid),
];

/// Result of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    pub id: String,
    pub passed: bool,
    pub detail: String,
}

impl ScenarioOutcome {
    fn pass(id: &str, detail: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            passed: true,
            detail: detail.into(),
        }
    }

    fn fail(id: &str, detail: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            passed: false,
            detail: detail.into(),
        }
    }
}

/// Outcomes of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// Report file name stamped with the start time,
    /// `report_YYYY-MM-DD_HH-MM-SS.json`.
    pub fn file_name(&self) -> String {
        format!("report_{}.json", self.started_at.format("%Y-%m-%d_%H-%M-%S"))
    }
}

async fn send(client: &SuperheroClient, target: Target) -> Result<ApiReply, ClientError> {
    match target {
        Target::Name(name) => client.search_raw(name).await,
        Target::Token { token, name } => client.search_raw_with_token(token, name).await,
        Target::Segment(name) => client.search_raw_segment(name).await,
    }
}

/// Run one scenario. Never fails; errors become a failed outcome.
pub async fn run_scenario(client: &SuperheroClient, scenario: &Scenario) -> ScenarioOutcome {
    let reply = match send(client, scenario.target).await {
        Ok(reply) => reply,
        Err(e) => return ScenarioOutcome::fail(scenario.id, format!("request failed: {e}")),
    };
    judge(scenario, &reply)
}

fn judge(scenario: &Scenario, reply: &ApiReply) -> ScenarioOutcome {
    let id = scenario.id;
    match scenario.expect {
        Expectation::NameContains(needle) => {
            if reply.status != 200 {
                return ScenarioOutcome::fail(id, format!("status {} != 200", reply.status));
            }
            if reply.body.get("results").is_none() {
                return ScenarioOutcome::fail(id, format!("'results' key missing: {}", reply.body));
            }
            if reply.any_name_contains(needle) {
                ScenarioOutcome::pass(id, format!("a result name contains '{needle}'"))
            } else {
                ScenarioOutcome::fail(
                    id,
                    format!("no result name contains '{needle}': {:?}", reply.result_names()),
                )
            }
        }
        Expectation::NotFound => match reply.classify() {
            shape @ (ErrorShape::NotFound | ErrorShape::BadNameRequest) => {
                ScenarioOutcome::pass(id, format!("error body: {shape}"))
            }
            _ => ScenarioOutcome::fail(id, format!("expected not-found error, got {}", reply.body)),
        },
        Expectation::AccessDenied => match reply.classify() {
            ErrorShape::AccessDenied => ScenarioOutcome::pass(id, "error body: access_denied"),
            _ => ScenarioOutcome::fail(id, format!("expected access denied, got {}", reply.body)),
        },
        Expectation::Success => {
            if reply.status != 200 {
                return ScenarioOutcome::fail(id, format!("status {} != 200", reply.status));
            }
            match reply.validate() {
                Ok(resp) if !resp.is_success() => {
                    ScenarioOutcome::fail(id, format!("response is '{}'", resp.response))
                }
                Ok(resp) if resp.results.is_empty() => {
                    ScenarioOutcome::fail(id, "no results returned")
                }
                Ok(resp) => ScenarioOutcome::pass(id, format!("{} results", resp.results.len())),
                Err(e) => ScenarioOutcome::fail(id, e.to_string()),
            }
        }
        Expectation::AllHeroesValid => match reply.validate() {
            Ok(resp) => match first_field_problem(&resp) {
                None => ScenarioOutcome::pass(id, format!("{} heroes valid", resp.results.len())),
                Some(problem) => ScenarioOutcome::fail(id, problem),
            },
            Err(e) => ScenarioOutcome::fail(id, e.to_string()),
        },
    }
}

/// Field-level checks on validated heroes, stated directly rather than
/// through the rule tables.
fn first_field_problem(resp: &HeroSearchResponse) -> Option<String> {
    resp.results.iter().find_map(hero_problem)
}

fn hero_problem(hero: &Hero) -> Option<String> {
    let blank = |s: &str| s.trim().is_empty();
    let name = &hero.name;
    if hero.biography.aliases.is_empty() {
        return Some(format!("aliases must be a non-empty list for hero {name}"));
    }
    if blank(&hero.biography.publisher) {
        return Some(format!("publisher must be a non-empty string for hero {name}"));
    }
    if blank(&hero.appearance.race) {
        return Some(format!("race must be a non-empty string for hero {name}"));
    }
    if hero.appearance.height.is_empty() || hero.appearance.weight.is_empty() {
        return Some(format!("height and weight must contain at least one entry for {name}"));
    }
    if blank(&hero.work.occupation) {
        return Some(format!("occupation must be a non-empty string for hero {name}"));
    }
    if blank(&hero.connections.group_affiliation) {
        return Some(format!("group_affiliation must be a non-empty string for hero {name}"));
    }
    if !hero.image.url.as_str().starts_with("http") {
        return Some(format!("invalid image URL for hero {name}: {}", hero.image.url));
    }
    None
}

/// Run every scenario in [`SCENARIOS`] in order.
pub async fn run_suite(client: &SuperheroClient) -> SuiteReport {
    run_scenarios(client, SCENARIOS).await
}

/// Run the given scenarios in order.
pub async fn run_scenarios<'a>(
    client: &SuperheroClient,
    scenarios: impl IntoIterator<Item = &'a Scenario>,
) -> SuiteReport {
    let started_at = Utc::now();
    let mut outcomes = Vec::new();
    for scenario in scenarios {
        let outcome = run_scenario(client, scenario).await;
        if outcome.passed {
            tracing::info!(scenario = scenario.id, "passed");
        } else {
            tracing::warn!(scenario = scenario.id, detail = %outcome.detail, "failed");
        }
        outcomes.push(outcome);
    }
    SuiteReport {
        started_at,
        finished_at: Utc::now(),
        outcomes,
    }
}
