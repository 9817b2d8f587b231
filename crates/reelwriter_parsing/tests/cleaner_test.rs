use reelwriter_parsing::TextCleaner;

#[test]
fn teleprompter_scenario() {
    let raw = "Stop doing this 1 thing.\n[INTRODUCTION]\n0:00-0:05\nHere's why it matters (b-roll: show dashboard).";
    let cleaned = TextCleaner::default().clean(raw);
    assert_eq!(cleaned, "Stop doing this 1 thing.\nHere's why it matters.");
}

#[test]
fn cleaning_is_idempotent() {
    let cleaner = TextCleaner::default();
    let samples = [
        "",
        "Plain sentence without punctuation",
        "Stop doing this 1 thing.\n[INTRODUCTION]\n0:00-0:05\nHere's why it matters (b-roll: show dashboard).",
        "Hook: You're wasting hours.\nPOINT 1 - Batch your work.\nIt adds up. CTA: Follow for more!",
        "(Music swells)\n[Cut to desk]\nOn-screen text: 3 TIPS",
        "Why? Because (ok) it works!  Really.\r\n\r\n0:10 to 0:20 Next, the fix.",
        "Nested (outer (inner) text) remains tricky. Right?",
        "Mid-line [aside] and 1:00 - 2:00 range. Done.",
    ];

    for sample in samples {
        let once = cleaner.clean(sample);
        assert_eq!(cleaner.clean(&once), once, "not idempotent for {sample:?}");
    }
}

#[test]
fn only_stage_directions_clean_to_empty() {
    let raw = "[INTRO]\n(Camera pans across the office)\nB-roll: team at work\n0:00-0:10";
    assert_eq!(TextCleaner::default().clean(raw), "");
}

#[test]
fn one_sentence_per_line() {
    let raw = "First idea. Second idea!\nThird idea? Fourth";
    assert_eq!(
        TextCleaner::default().clean(raw),
        "First idea.\nSecond idea!\nThird idea?\nFourth"
    );
}

#[test]
fn wider_aside_threshold_keeps_more() {
    let cleaner = TextCleaner::with_short_aside_max(20);
    assert_eq!(cleaner.clean("Try it (really)."), "Try it (really).");
    assert_eq!(TextCleaner::default().clean("Try it (really)."), "Try it.");
}

#[test]
fn markdown_headings_are_dropped_but_hashtags_stay() {
    let raw = "## Intro\nBatch your emails.\n#\nSave #time every day.";
    assert_eq!(
        TextCleaner::default().clean(raw),
        "Batch your emails.\nSave #time every day."
    );
}

#[test]
fn chained_timestamps_clean_in_one_call() {
    let stamps: String = (10..22).map(|s| format!("0:{s}: ")).collect();
    let raw = format!("{stamps}Here is the point.");
    let cleaner = TextCleaner::default();
    let once = cleaner.clean(&raw);
    assert_eq!(once, "Here is the point.");
    assert_eq!(cleaner.clean(&once), once);
}

#[test]
fn deeply_nested_asides_reach_a_fixed_point() {
    let mut raw = String::from("Keep going");
    for level in 0..12 {
        raw = format!("outer level {level} words ({raw})");
    }
    let raw = format!("Start here. {raw}. Done.");
    let cleaner = TextCleaner::default();
    let once = cleaner.clean(&raw);
    assert_eq!(cleaner.clean(&once), once);
    assert!(!once.contains('('));
}
