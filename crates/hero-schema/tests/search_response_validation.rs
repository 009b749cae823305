//! Integration tests: validate recorded search bodies and targeted
//! mutations of them.
//!
//! The fixture `search_batman.json` is a trimmed recording of
//! `GET /{token}/search/batman`. Each negative test breaks exactly one
//! field and checks that the error names that field's path.

use hero_core::{ErrorClass, FieldPath, Gender, ValidationError};
use hero_schema::{collect_violations, validate_hero, validate_hero_search_response};
use serde_json::{json, Value};

fn batman_body() -> Value {
    serde_json::from_str(include_str!("fixtures/search_batman.json"))
        .expect("fixture is valid JSON")
}

/// Validate `body` and return the error, panicking if it passes.
fn rejection(body: &Value) -> ValidationError {
    match validate_hero_search_response(body) {
        Ok(_) => panic!("expected rejection, body passed:\n{body:#}"),
        Err(e) => e,
    }
}

#[test]
fn recorded_batman_search_validates() {
    let resp = validate_hero_search_response(&batman_body()).unwrap();
    assert!(resp.is_success());
    assert_eq!(resp.results_for, "batman");
    assert_eq!(resp.results.len(), 2);

    let batman = &resp.results[0];
    assert_eq!(batman.id, 70);
    assert_eq!(batman.name, "Batman");
    assert_eq!(batman.powerstats.intelligence, 100);
    assert_eq!(batman.powerstats.strength, 26);
    assert_eq!(batman.biography.full_name, "Bruce Wayne");
    assert_eq!(batman.biography.aliases, vec!["Insider", "Matches Malone"]);
    assert_eq!(batman.appearance.gender, Gender::Male);
    assert_eq!(batman.appearance.height, vec!["6'2", "188 cm"]);
    assert_eq!(batman.appearance.eye_color, "blue");
    assert_eq!(
        batman.image.url.as_str(),
        "https://www.superherodb.com/pictures2/portraits/10/100/639.jpg"
    );

    // API order is preserved.
    assert_eq!(resp.results[1].name, "Batman II");
    assert_eq!(resp.results[1].id, 71);
}

#[test]
fn every_hero_passes_field_level_checks() {
    let resp = validate_hero_search_response(&batman_body()).unwrap();
    for hero in &resp.results {
        assert!(!hero.biography.aliases.is_empty());
        assert!(!hero.biography.publisher.trim().is_empty());
        assert!(Gender::all().contains(&hero.appearance.gender));
        assert!(!hero.appearance.race.trim().is_empty());
        assert!(!hero.appearance.height.is_empty());
        assert!(!hero.appearance.weight.is_empty());
        assert!(!hero.work.occupation.trim().is_empty());
        assert!(!hero.connections.group_affiliation.trim().is_empty());
        assert!(hero.image.url.as_str().starts_with("http"));
    }
}

#[test]
fn internal_spelling_is_accepted() {
    let body = json!({
        "response": "success",
        "results_for": "batman",
        "results": [{
            "id": 70,
            "name": "Batman",
            "powerstats": {"intelligence": 100, "strength": 26, "speed": 27,
                           "durability": 50, "power": 47, "combat": 100},
            "biography": {
                "full_name": "Bruce Wayne", "alter_egos": "No alter egos found.",
                "aliases": ["Insider"], "place_of_birth": "Gotham",
                "first_appearance": "Detective Comics #27",
                "publisher": "DC Comics", "alignment": "good"
            },
            "appearance": {"gender": "Male", "race": "Human",
                           "height": ["6'2"], "weight": ["210 lb"],
                           "eye_color": "blue", "hair_color": "black"},
            "work": {"occupation": "Businessman", "base": "Batcave"},
            "connections": {"group_affiliation": "Justice League", "relatives": "Alfred"},
            "image": {"url": "https://www.superherodb.com/pictures2/portraits/10/100/639.jpg"}
        }]
    });
    let resp = validate_hero_search_response(&body).unwrap();
    assert_eq!(resp.results_for, "batman");
    assert_eq!(resp.results[0].biography.place_of_birth, "Gotham");
    assert_eq!(resp.results[0].connections.group_affiliation, "Justice League");
}

#[test]
fn wire_key_wins_when_both_spellings_present() {
    let mut body = batman_body();
    body["results"][0]["biography"]["full_name"] = json!("Internal Spelling");
    let resp = validate_hero_search_response(&body).unwrap();
    assert_eq!(resp.results[0].biography.full_name, "Bruce Wayne");
}

#[test]
fn stored_strings_are_not_trimmed() {
    let mut body = batman_body();
    body["results"][0]["biography"]["full-name"] = json!("  Bruce Wayne ");
    let resp = validate_hero_search_response(&body).unwrap();
    assert_eq!(resp.results[0].biography.full_name, "  Bruce Wayne ");
}

#[test]
fn empty_results_are_valid() {
    let body = json!({"response": "success", "results-for": "nobody", "results": []});
    let resp = validate_hero_search_response(&body).unwrap();
    assert!(resp.results.is_empty());
}

#[test]
fn extra_keys_are_ignored() {
    let mut body = batman_body();
    body["results"][0]["image"]["thumbnail"] = json!("x.png");
    body["page"] = json!(1);
    assert!(validate_hero_search_response(&body).is_ok());
}

// ── Powerstats ──────────────────────────────────────────────────────────

#[test]
fn negative_stat_is_rejected_with_its_path() {
    let mut body = batman_body();
    body["results"][1]["powerstats"]["durability"] = json!("-1");
    let err = rejection(&body);
    assert_eq!(err.path().to_string(), "results[1].powerstats.durability");
    assert_eq!(err.class(), ErrorClass::Constraint);
    assert_eq!(err.reason(), "must be non-negative");
}

#[test]
fn non_numeric_stat_is_a_type_error() {
    let mut body = batman_body();
    body["results"][0]["powerstats"]["power"] = json!("null");
    let err = rejection(&body);
    assert_eq!(err.path().to_string(), "results[0].powerstats.power");
    assert_eq!(err.class(), ErrorClass::Type);
}

#[test]
fn fractional_stat_truncates_toward_zero() {
    let mut body = batman_body();
    body["results"][0]["powerstats"]["speed"] = json!(27.5);
    body["results"][0]["powerstats"]["power"] = json!(-0.5);
    let resp = validate_hero_search_response(&body).unwrap();
    assert_eq!(resp.results[0].powerstats.speed, 27);
    assert_eq!(resp.results[0].powerstats.power, 0);
}

#[test]
fn fractional_negative_stat_is_rejected() {
    let mut body = batman_body();
    body["results"][0]["powerstats"]["speed"] = json!(-1.5);
    let err = rejection(&body);
    assert_eq!(err.path().to_string(), "results[0].powerstats.speed");
    assert_eq!(err.class(), ErrorClass::Constraint);
}

#[test]
fn fractional_id_is_a_type_error() {
    let mut body = batman_body();
    body["results"][0]["id"] = json!(70.5);
    let err = rejection(&body);
    assert_eq!(err.path().to_string(), "results[0].id");
    assert_eq!(err.class(), ErrorClass::Type);
}

#[test]
fn zero_stat_is_accepted() {
    let mut body = batman_body();
    body["results"][0]["powerstats"]["speed"] = json!(0);
    let resp = validate_hero_search_response(&body).unwrap();
    assert_eq!(resp.results[0].powerstats.speed, 0);
}

// ── Biography ───────────────────────────────────────────────────────────

#[test]
fn blank_biography_strings_are_rejected() {
    for (wire, internal) in [
        ("full-name", "full_name"),
        ("alter-egos", "alter_egos"),
        ("place-of-birth", "place_of_birth"),
        ("first-appearance", "first_appearance"),
        ("publisher", "publisher"),
        ("alignment", "alignment"),
    ] {
        let mut body = batman_body();
        body["results"][0]["biography"][wire] = json!("   ");
        let err = rejection(&body);
        assert_eq!(
            err.path().to_string(),
            format!("results[0].biography.{internal}")
        );
        assert_eq!(err.class(), ErrorClass::Constraint);
    }
}

#[test]
fn empty_aliases_are_rejected() {
    let mut body = batman_body();
    body["results"][0]["biography"]["aliases"] = json!([]);
    let err = rejection(&body);
    assert_eq!(err.path().to_string(), "results[0].biography.aliases");
}

#[test]
fn blank_alias_elements_are_accepted() {
    let mut body = batman_body();
    body["results"][0]["biography"]["aliases"] = json!([""]);
    let resp = validate_hero_search_response(&body).unwrap();
    assert_eq!(resp.results[0].biography.aliases, vec![""]);
}

#[test]
fn non_string_alias_is_a_type_error() {
    let mut body = batman_body();
    body["results"][0]["biography"]["aliases"] = json!(["Insider", 7]);
    let err = rejection(&body);
    assert_eq!(err.path().to_string(), "results[0].biography.aliases[1]");
    assert_eq!(err.class(), ErrorClass::Type);
}

// ── Appearance ──────────────────────────────────────────────────────────

#[test]
fn every_known_gender_is_accepted() {
    for (wire, gender) in [
        ("Male", Gender::Male),
        ("Female", Gender::Female),
        ("-", Gender::Unspecified),
        ("Other", Gender::Other),
    ] {
        let mut body = batman_body();
        body["results"][0]["appearance"]["gender"] = json!(wire);
        let resp = validate_hero_search_response(&body).unwrap();
        assert_eq!(resp.results[0].appearance.gender, gender);
    }
}

#[test]
fn unknown_gender_is_rejected() {
    for bad in ["male", "M", "", "Unknown", " Male"] {
        let mut body = batman_body();
        body["results"][0]["appearance"]["gender"] = json!(bad);
        let err = rejection(&body);
        assert_eq!(err.path().to_string(), "results[0].appearance.gender");
        assert_eq!(err.class(), ErrorClass::Constraint);
    }
}

#[test]
fn height_and_weight_need_non_blank_entries() {
    for field in ["height", "weight"] {
        let mut empty = batman_body();
        empty["results"][0]["appearance"][field] = json!([]);
        assert_eq!(
            rejection(&empty).path().to_string(),
            format!("results[0].appearance.{field}")
        );

        let mut blank = batman_body();
        blank["results"][0]["appearance"][field] = json!(["6'2", "  "]);
        let err = rejection(&blank);
        assert_eq!(err.path().to_string(), format!("results[0].appearance.{field}"));
        assert_eq!(err.reason(), "entries must be non-empty strings");
    }
}

#[test]
fn blank_appearance_strings_are_rejected() {
    for (wire, internal) in [
        ("race", "race"),
        ("eye-color", "eye_color"),
        ("hair-color", "hair_color"),
    ] {
        let mut body = batman_body();
        body["results"][0]["appearance"][wire] = json!("");
        assert_eq!(
            rejection(&body).path().to_string(),
            format!("results[0].appearance.{internal}")
        );
    }
}

// ── Work, connections, image ────────────────────────────────────────────

#[test]
fn blank_work_and_connections_are_rejected() {
    for (record, wire, internal) in [
        ("work", "occupation", "occupation"),
        ("work", "base", "base"),
        ("connections", "group-affiliation", "group_affiliation"),
        ("connections", "relatives", "relatives"),
    ] {
        let mut body = batman_body();
        body["results"][0][record][wire] = json!("\t");
        assert_eq!(
            rejection(&body).path().to_string(),
            format!("results[0].{record}.{internal}")
        );
    }
}

#[test]
fn image_url_must_be_absolute_http() {
    for bad in ["/pictures2/portraits/10/100/639.jpg", "ftp://example.com/a.jpg", "not a url", ""] {
        let mut body = batman_body();
        body["results"][0]["image"]["url"] = json!(bad);
        let err = rejection(&body);
        assert_eq!(err.path().to_string(), "results[0].image.url", "{bad:?}");
    }
}

// ── Hero and top level ──────────────────────────────────────────────────

#[test]
fn blank_hero_name_is_rejected() {
    let mut body = batman_body();
    body["results"][1]["name"] = json!(" ");
    let err = rejection(&body);
    assert_eq!(err.path().to_string(), "results[1].name");
    assert_eq!(err.reason(), "hero name must not be empty");
}

#[test]
fn blank_top_level_fields_are_rejected() {
    for (wire, internal) in [("response", "response"), ("results-for", "results_for")] {
        let mut body = batman_body();
        body[wire] = json!("");
        assert_eq!(rejection(&body).path().to_string(), internal);
    }
}

#[test]
fn missing_sub_record_is_structural() {
    let mut body = batman_body();
    body["results"][0]
        .as_object_mut()
        .unwrap()
        .remove("connections");
    let err = rejection(&body);
    assert_eq!(err.path().to_string(), "results[0].connections");
    assert_eq!(err.class(), ErrorClass::Structural);
}

#[test]
fn missing_aliased_field_reports_internal_name() {
    let mut body = batman_body();
    body["results"][0]["appearance"]
        .as_object_mut()
        .unwrap()
        .remove("eye-color");
    let err = rejection(&body);
    assert_eq!(err.path().to_string(), "results[0].appearance.eye_color");
    assert_eq!(err.class(), ErrorClass::Structural);
}

#[test]
fn wrong_container_types() {
    let mut body = batman_body();
    body["results"] = json!({"0": {}});
    assert_eq!(rejection(&body).class(), ErrorClass::Type);

    let mut body = batman_body();
    body["results"][0]["powerstats"] = json!(["100"]);
    let err = rejection(&body);
    assert_eq!(err.path().to_string(), "results[0].powerstats");
    assert_eq!(err.class(), ErrorClass::Type);

    let err = rejection(&json!([batman_body()]));
    assert_eq!(err.path(), &FieldPath::root());
}

#[test]
fn error_body_is_not_a_search_response() {
    let body = json!({"response": "error", "error": "character with given name not found"});
    let err = rejection(&body);
    assert_eq!(err.class(), ErrorClass::Structural);
}

// ── Evaluation order ────────────────────────────────────────────────────

#[test]
fn leaf_records_fail_before_hero_fields() {
    let mut body = batman_body();
    body["results"][0]["name"] = json!("");
    body["results"][0]["image"]["url"] = json!("relative.jpg");
    assert_eq!(rejection(&body).path().to_string(), "results[0].image.url");
}

#[test]
fn heroes_fail_before_top_level_fields() {
    let mut body = batman_body();
    body["response"] = json!("");
    body["results"][1]["powerstats"]["combat"] = json!(-5);
    assert_eq!(
        rejection(&body).path().to_string(),
        "results[1].powerstats.combat"
    );
}

// ── Single hero, exhaustive mode ────────────────────────────────────────

#[test]
fn validate_hero_roots_paths_at_the_hero() {
    let mut hero = batman_body()["results"][0].clone();
    assert_eq!(validate_hero(&hero).unwrap().name, "Batman");

    hero["work"]["base"] = json!("");
    let err = validate_hero(&hero).unwrap_err();
    assert_eq!(err.path().to_string(), "work.base");
}

#[test]
fn collect_violations_lists_every_problem() {
    assert!(collect_violations(&batman_body()).is_empty());

    let mut body = batman_body();
    body["results"][0]["appearance"]["gender"] = json!("Robot");
    body["results"][0]["powerstats"]["speed"] = json!(-1);
    body["results"][1]["work"]["occupation"] = json!("");
    body["results-for"] = json!(" ");
    let paths: Vec<String> = collect_violations(&body)
        .iter()
        .map(|e| e.path().to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "results[0].powerstats.speed",
            "results[0].appearance.gender",
            "results[1].work.occupation",
            "results_for",
        ]
    );
}

// ── Round trip and idempotence ──────────────────────────────────────────

#[test]
fn reserialized_response_validates_to_the_same_records() {
    let first = validate_hero_search_response(&batman_body()).unwrap();
    let wire = serde_json::to_value(&first).unwrap();

    assert_eq!(wire["results-for"], "batman");
    assert_eq!(wire["results"][0]["biography"]["full-name"], "Bruce Wayne");
    assert_eq!(wire["results"][0]["powerstats"]["intelligence"], json!(100));

    let second = validate_hero_search_response(&wire).unwrap();
    assert_eq!(first, second);
}

/// The fixture as the validator should re-emit it: numeric strings become
/// numbers and keys outside the model are gone.
fn normalized_fixture() -> Value {
    let mut body = batman_body();
    for hero in body["results"].as_array_mut().unwrap() {
        let id: i64 = hero["id"].as_str().unwrap().parse().unwrap();
        hero["id"] = json!(id);
        for stat in hero["powerstats"].as_object_mut().unwrap().values_mut() {
            let n: u64 = stat.as_str().unwrap().parse().unwrap();
            *stat = json!(n);
        }
    }
    body
}

#[test]
fn serialized_response_matches_normalized_input() {
    let mut body = batman_body();
    body["source"] = json!("recording");
    body["results"][0]["biography"]["nickname"] = json!("The Bat");

    let wire = serde_json::to_value(validate_hero_search_response(&body).unwrap()).unwrap();
    assert_eq!(wire, normalized_fixture());
}

#[test]
fn validation_is_idempotent() {
    let body = batman_body();
    let a = validate_hero_search_response(&body).unwrap();
    let b = validate_hero_search_response(&body).unwrap();
    assert_eq!(a, b);
}
