//! Section roles and their item templates.

/// Placeholder replaced with the topic.
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Role a section plays in a generated outline, chosen by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum SectionRole {
    #[strum(serialize = "Introduction")]
    Introduction,
    #[strum(serialize = "Understanding")]
    Understanding,
    #[strum(serialize = "Main Points")]
    MainPoints,
    #[strum(serialize = "Practical Applications")]
    PracticalApplications,
    #[strum(serialize = "Case Studies")]
    CaseStudies,
    #[strum(serialize = "Conclusion")]
    Conclusion,
}

/// Roles cycled through by middle sections.
const BODY_ROLES: [SectionRole; 4] = [
    SectionRole::Understanding,
    SectionRole::MainPoints,
    SectionRole::PracticalApplications,
    SectionRole::CaseStudies,
];

impl SectionRole {
    /// Role of section `index` in an outline of `count` sections.
    pub fn for_position(index: usize, count: usize) -> Self {
        if index == 0 {
            Self::Introduction
        } else if index + 1 == count {
            Self::Conclusion
        } else {
            BODY_ROLES[(index - 1) % BODY_ROLES.len()]
        }
    }

    /// Heading template, without the ordinal prefix.
    pub fn heading_template(self) -> &'static str {
        match self {
            Self::Introduction => "Introduction to {topic}",
            Self::Understanding => "Understanding {topic}",
            Self::MainPoints => "Main Points of {topic}",
            Self::PracticalApplications => "Practical Applications of {topic}",
            Self::CaseStudies => "Case Studies in {topic}",
            Self::Conclusion => "Conclusion",
        }
    }

    /// Item templates, reused cyclically when a section needs more.
    pub fn item_templates(self) -> &'static [&'static str] {
        match self {
            Self::Introduction => &[
                "Define {topic} and its importance",
                "Statistics related to {topic}",
                "Overview of the benefits of {topic}",
                "Who {topic} matters to",
            ],
            Self::Understanding => &[
                "Common challenges with {topic}",
                "The psychology behind {topic}",
                "Assessment: identifying your approach to {topic}",
                "Misconceptions about {topic}",
            ],
            Self::MainPoints => &[
                "First major point about {topic} with evidence",
                "Second major point about {topic} with examples",
                "Third major point about {topic} with analysis",
                "Counterarguments on {topic}",
            ],
            Self::PracticalApplications => &[
                "How to apply {topic} day to day",
                "Strategies for getting started with {topic}",
                "Tools and resources for {topic}",
                "Measuring progress with {topic}",
            ],
            Self::CaseStudies => &[
                "Example 1: a {topic} success story",
                "Example 2: lessons learned from {topic}",
                "Key takeaways from {topic} examples",
            ],
            Self::Conclusion => &[
                "Recap of the main points on {topic}",
                "Call to action for {topic}",
                "Final thoughts and the future of {topic}",
            ],
        }
    }
}

/// Fill a template with the topic.
pub fn render(template: &str, topic: &str) -> String {
    template.replace(TOPIC_PLACEHOLDER, topic)
}

/// Upper-case roman numeral for `n`; falls back to digits outside 1..=3999.
pub fn roman_numeral(n: usize) -> String {
    const TABLE: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    if n == 0 || n > 3999 {
        return n.to_string();
    }

    let mut rest = n;
    let mut out = String::new();
    for (value, symbol) in TABLE {
        while rest >= value {
            out.push_str(symbol);
            rest -= value;
        }
    }
    out
}
