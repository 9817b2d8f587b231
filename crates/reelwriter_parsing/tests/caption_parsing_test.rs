use reelwriter_parsing::{
    CaptionParser, CaptionSection, INSTAGRAM_PLACEHOLDER, LINKEDIN_PLACEHOLDER,
};

const WELL_FORMED: &str = "\
1️⃣ 📲 Instagram / Facebook / Threads Caption
Your build isn't slow, your habits are. 🚀 #rust #devtips

2️⃣ 💼 LinkedIn Caption
Compile times shape team velocity more than most leaders realise.

3️⃣ 📺 10 YouTube Titles
Why Your Rust Builds Crawl
Fix Rust Compile Times Today
Stop Waiting on Cargo
";

#[test]
fn well_formed_sections_are_recovered() {
    let captions = CaptionParser::default().parse(WELL_FORMED);

    assert_eq!(
        captions.instagram,
        "Your build isn't slow, your habits are. 🚀 #rust #devtips"
    );
    assert_eq!(
        captions.linkedin,
        "Compile times shape team velocity more than most leaders realise."
    );
    assert_eq!(captions.youtube_titles.len(), 3);
    assert_eq!(captions.youtube_titles[0], "Why Your Rust Builds Crawl");
}

#[test]
fn missing_title_section_degrades_to_empty_list() {
    let text = WELL_FORMED
        .split("3️⃣")
        .next()
        .unwrap_or_default()
        .to_string();
    let captions = CaptionParser::default().parse(&text);

    assert!(captions.youtube_titles.is_empty());
    assert!(captions.instagram.starts_with("Your build"));
    assert!(captions.linkedin.starts_with("Compile times"));
}

#[test]
fn missing_caption_sections_get_placeholders() {
    let captions = CaptionParser::default().parse("Nothing structured here at all.");
    assert_eq!(captions.instagram, INSTAGRAM_PLACEHOLDER);
    assert_eq!(captions.linkedin, LINKEDIN_PLACEHOLDER);
    assert!(captions.youtube_titles.is_empty());
}

#[test]
fn labels_are_stripped_case_insensitively() {
    let text = "1️⃣ **INSTAGRAM CAPTION:** Hi there\n2️⃣ linkedin caption - Hello team\n3️⃣ YouTube Titles:\nOne";
    let captions = CaptionParser::default().parse(text);
    assert_eq!(captions.instagram, "Hi there");
    assert_eq!(captions.linkedin, "Hello team");
    assert_eq!(captions.youtube_titles, vec!["One"]);
}

#[test]
fn structured_json_is_preferred() {
    let text = r#"```json
{"instagram": "IG text", "linkedin": "LI text", "youtubeTitles": ["T1", " ", "T2"]}
```"#;
    let captions = CaptionParser::default().parse(text);
    assert_eq!(captions.instagram, "IG text");
    assert_eq!(captions.linkedin, "LI text");
    assert_eq!(captions.youtube_titles, vec!["T1", "T2"]);
}

#[test]
fn custom_delimiters_follow_prompt_wording() {
    let sections = vec![
        CaptionSection::new(r"(?m)^SOCIAL:", "caption"),
        CaptionSection::new(r"(?m)^PRO:", "caption"),
        CaptionSection::new(r"(?m)^TITLES:", "titles"),
    ];
    let parser = CaptionParser::new(&sections).unwrap();
    let captions = parser.parse("SOCIAL: short and punchy\nPRO: measured\nTITLES:\nA\nB");
    assert_eq!(captions.instagram, "short and punchy");
    assert_eq!(captions.linkedin, "measured");
    assert_eq!(captions.youtube_titles, vec!["A", "B"]);
}
