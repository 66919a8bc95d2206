use super::common::*;

use crate::valuation::{
    FactorKind, Locale, NarrativeConfig, ValuationConfig, ValuationEngine, ValuationError,
};

fn strong_target() -> crate::valuation::ListingRow {
    let mut target = listing_row("1001");
    target.price_saving = Some(2_300.0);
    target.mileage_saving = Some(150.0);
    target.options = vec!["Navigation System".to_string()];
    with_rate(target, 0.05)
}

#[test]
fn repeated_evaluations_serialize_identically() {
    let peers = spread_peers(25);
    let first = serde_json::to_string(&evaluate(&strong_target(), &peers)).expect("json");
    let second = serde_json::to_string(&evaluate(&strong_target(), &peers)).expect("json");
    assert_eq!(first, second);
}

#[test]
fn report_carries_identity_decision_and_every_factor() {
    let report = evaluate(&strong_target(), &spread_peers(25));
    let json = serde_json::to_value(&report).expect("json");

    assert_eq!(json["listing_id"], "1001");
    assert_eq!(json["full_key"], FULL_KEY);
    assert_eq!(json["year"], YEAR);
    assert_eq!(json["sample_size"], 25);
    assert_eq!(json["is_recommended"], true);
    assert_eq!(json["verdict"], "recommended");
    assert_eq!(json["wins"], 2);
    assert_eq!(json["ok_price"], true);
    assert_eq!(json["ok_mile"], true);
    assert_eq!(json["ok_depr"], false);
    assert!(json["hot_ok"].is_boolean());
    assert!(json.get("flags").is_none(), "decision flags are top-level fields");
    assert_eq!(
        json["highlights"],
        serde_json::json!(["price_saving", "mileage_saving"])
    );
    assert!(json["decision_reason"].as_str().expect("text").starts_with("Recommended: "));
    assert_eq!(json["summary"]["powertrain"], "unknown");
    assert!(json["summary"]["points"].as_array().expect("points").len() >= 1);
    assert!(json["summary"]["next_actions"].as_array().expect("actions").len() >= 1);

    for kind in FactorKind::ALL {
        let entry = &json["evaluations"][kind.field_name()];
        assert!(entry["msg"].is_string(), "{} missing msg", kind.field_name());
        assert!(entry.get("value").is_some());
    }
    assert_eq!(
        json["evaluations"]["options"]["value"],
        serde_json::json!(["Navigation System"])
    );
}

#[test]
fn invalid_cohort_row_fails_the_whole_evaluation() {
    let mut peers = spread_peers(25);
    peers[7].mileage = None;

    let error = engine()
        .evaluate(&strong_target(), &peers)
        .expect_err("invalid peer");
    assert_eq!(
        error,
        ValuationError::MissingField {
            listing_id: "8007".to_string(),
            field: "mileage",
        }
    );
}

#[test]
fn non_positive_target_prediction_is_rejected_up_front() {
    let mut target = strong_target();
    target.y_pred = Some(0.0);

    // Even below the sample floor, where no rate would otherwise be needed.
    let error = engine()
        .evaluate(&target, &spread_peers(3))
        .expect_err("undefined depreciation rate");
    assert!(matches!(error, ValuationError::NonPositivePrediction { .. }));
}

#[test]
fn configured_locale_and_emoji_flow_through() {
    let engine = ValuationEngine::new(ValuationConfig {
        locale: Locale::Zh,
        narrative: NarrativeConfig {
            use_emoji: true,
            ..NarrativeConfig::default()
        },
        ..ValuationConfig::default()
    });

    let report = engine
        .evaluate(&strong_target(), &spread_peers(25))
        .expect("evaluation succeeds");
    assert!(report.decision_reason.starts_with("✅ 推荐："));
    let heat = report
        .evaluations
        .get(FactorKind::HeatRank)
        .expect("heat evaluated");
    assert_eq!(heat.msg, "全量热度排名：第 400 名");
}

#[test]
fn text_rendering_lists_points_and_factors() {
    let report = evaluate(&strong_target(), &spread_peers(25));
    let text = report.render_text();

    assert!(text.starts_with("2020 Honda Civic EX (listing 1001)"));
    assert!(text.contains("verdict: recommended (2 of 3 core wins, 25 comparable listings)"));
    for point in &report.summary.points {
        assert!(text.contains(&format!("- {point}")));
    }
    assert!(text.contains("price_saving"));
    assert!(text.contains("safety_features"));
}
