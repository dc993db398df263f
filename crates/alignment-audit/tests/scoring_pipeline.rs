//! Integration specifications for the scoring pipeline over recorded
//! ratings: store mutations in, tiered section scores out.

use alignment_audit::assessment::scoring::{compute_progress, compute_scores, section_status};
use alignment_audit::assessment::{InMemorySnapshotStore, ResponseStore, RiskLevel};
use alignment_audit::QuestionBank;

fn uniform_ratings(store: &mut ResponseStore<InMemorySnapshotStore>, bank: &QuestionBank, rating: u8) {
    let ids: Vec<&'static str> = bank
        .sections()
        .iter()
        .flat_map(|section| section.questions.iter().map(|question| question.id))
        .collect();
    for id in ids {
        store.set_answer(bank, id, rating).expect("known question");
    }
}

#[test]
fn uniform_ratings_map_onto_the_five_risk_tiers() {
    let bank = QuestionBank::standard();
    let expectations = [
        (1, RiskLevel::Critical),
        (2, RiskLevel::High),
        (3, RiskLevel::Moderate),
        (4, RiskLevel::Minor),
        (5, RiskLevel::Ready),
    ];

    for (rating, expected) in expectations {
        let mut store = ResponseStore::load_or_init(InMemorySnapshotStore::new());
        uniform_ratings(&mut store, &bank, rating);

        let scores = compute_scores(store.state(), &bank);
        assert_eq!(scores.len(), 5);
        for score in &scores {
            assert_eq!(score.score, f64::from(rating));
            assert_eq!(
                score.risk_level, expected,
                "rating {rating} should land in {:?}",
                expected
            );
        }
    }
}

#[test]
fn section_order_is_stable_across_views() {
    let bank = QuestionBank::standard();
    let mut store = ResponseStore::load_or_init(InMemorySnapshotStore::new());
    store.set_answer(&bank, "q33", 5).expect("known question");

    let score_keys: Vec<&str> = compute_scores(store.state(), &bank)
        .iter()
        .map(|score| score.key)
        .collect();
    let status_keys: Vec<&str> = section_status(store.state(), &bank)
        .iter()
        .map(|status| status.key)
        .collect();

    assert_eq!(score_keys, vec!["corp", "biz", "opmodel", "exec", "tech"]);
    assert_eq!(score_keys, status_keys);
}

#[test]
fn mixed_ratings_tier_each_section_independently() {
    let bank = QuestionBank::standard();
    let mut store = ResponseStore::load_or_init(InMemorySnapshotStore::new());

    // Strong strategy story, weak technology story.
    for id in ["q1", "q2", "q3"] {
        store.set_answer(&bank, id, 5).expect("known question");
    }
    for id in ["q33", "q34", "q35"] {
        store.set_answer(&bank, id, 1).expect("known question");
    }

    let scores = compute_scores(store.state(), &bank);
    let corp = scores.iter().find(|s| s.key == "corp").expect("corp");
    let tech = scores.iter().find(|s| s.key == "tech").expect("tech");
    assert_eq!(corp.risk_level, RiskLevel::Ready);
    assert_eq!(tech.risk_level, RiskLevel::Critical);

    // Untouched sections keep the no-data sentinel.
    let biz = scores.iter().find(|s| s.key == "biz").expect("biz");
    assert_eq!(biz.score, 0.0);
}

#[test]
fn overwriting_a_rating_moves_the_tier_without_touching_progress() {
    let bank = QuestionBank::standard();
    let mut store = ResponseStore::load_or_init(InMemorySnapshotStore::new());
    store.set_answer(&bank, "q1", 1).expect("known question");

    let before = compute_progress(store.state(), &bank);
    let critical = compute_scores(store.state(), &bank);
    assert_eq!(
        critical.iter().find(|s| s.key == "corp").expect("corp").risk_level,
        RiskLevel::Critical
    );

    store.set_answer(&bank, "q1", 5).expect("overwrite");
    let after = compute_progress(store.state(), &bank);
    let ready = compute_scores(store.state(), &bank);
    assert_eq!(
        ready.iter().find(|s| s.key == "corp").expect("corp").risk_level,
        RiskLevel::Ready
    );
    assert_eq!(before, after, "overwriting is not additional progress");
}
