//! Built-in pattern rules for common learner mistakes
//!
//! Each entry is a [`RuleSpec`]. Patterns are case-insensitive unless they
//! deal with case or whitespace themselves. Rules that need to look at a
//! captured word before deciding use [`Fix::Compute`].

use super::pattern::{Fix, RuleSpec};
use crate::models::{Category, ProficiencyLevel, Severity};
use regex::Captures;

/// Word starts that take "a" despite a vowel letter ("a university", "a one-off")
const CONSONANT_SOUND_PREFIXES: &[&str] = &[
    "uni", "use", "usu", "us", "uti", "ure", "uro", "eu", "ewe", "one", "once", "ubiq",
];

fn is_acronym(word: &str) -> bool {
    word.len() > 1 && word.chars().all(|c| c.is_ascii_uppercase())
}

fn an_before_vowel(caps: &Captures<'_>) -> Option<String> {
    let word = &caps[2];
    let lower = word.to_lowercase();
    if is_acronym(word) || CONSONANT_SOUND_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return None;
    }
    Some(format!("an {}", word))
}

fn a_before_consonant(caps: &Captures<'_>) -> Option<String> {
    let word = &caps[2];
    if is_acronym(word) {
        return None;
    }
    Some(format!("a {}", word))
}

fn strip_plural(caps: &Captures<'_>) -> Option<String> {
    let word = &caps[1];
    word.strip_suffix(['s', 'S']).map(str::to_string)
}

fn every_singular(caps: &Captures<'_>) -> Option<String> {
    let noun = caps[1].to_lowercase();
    let singular = match noun.as_str() {
        "people" | "persons" => "person".to_string(),
        other => other.strip_suffix('s').unwrap_or(other).to_string(),
    };
    Some(format!("{} {}", &caps[0][..5], singular))
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    let key = key.to_lowercase();
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

const TAKE_FORMS: &[(&str, &str)] = &[
    ("make", "take"),
    ("makes", "takes"),
    ("made", "took"),
    ("making", "taking"),
];

fn take_a_photo(caps: &Captures<'_>) -> Option<String> {
    let verb = lookup(TAKE_FORMS, &caps[1])?;
    let article = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some(format!("{} {}{}", verb, article, &caps[3]))
}

const MAKE_FORMS: &[(&str, &str)] = &[
    ("do", "make"),
    ("does", "makes"),
    ("did", "made"),
    ("doing", "making"),
    ("done", "made"),
];

fn make_a_mistake(caps: &Captures<'_>) -> Option<String> {
    let verb = lookup(MAKE_FORMS, &caps[1])?;
    Some(format!("{} {}", verb, &caps[2]))
}

const BASE_FORMS: &[(&str, &str)] = &[
    ("went", "go"),
    ("came", "come"),
    ("saw", "see"),
    ("had", "have"),
    ("made", "make"),
    ("took", "take"),
    ("gave", "give"),
    ("wrote", "write"),
    ("ate", "eat"),
    ("bought", "buy"),
    ("said", "say"),
    ("knew", "know"),
    ("thought", "think"),
    ("felt", "feel"),
    ("found", "find"),
    ("left", "leave"),
    ("got", "get"),
    ("told", "tell"),
];

fn base_after_do(caps: &Captures<'_>) -> Option<String> {
    let base = lookup(BASE_FORMS, &caps[2])?;
    Some(format!("{} {}", &caps[1], base))
}

const INFORMAL: &[(&str, &str)] = &[
    ("gonna", "going to"),
    ("wanna", "want to"),
    ("gotta", "have to"),
    ("kinda", "kind of"),
    ("sorta", "sort of"),
];

fn formal_form(caps: &Captures<'_>) -> Option<String> {
    lookup(INFORMAL, &caps[1]).map(str::to_string)
}

const STRONGER_ADJECTIVES: &[(&str, &str)] = &[
    ("good", "excellent"),
    ("bad", "terrible"),
    ("big", "huge"),
    ("small", "tiny"),
    ("happy", "delighted"),
    ("sad", "miserable"),
    ("tired", "exhausted"),
    ("important", "essential"),
    ("beautiful", "gorgeous"),
    ("interesting", "fascinating"),
    ("hungry", "starving"),
    ("angry", "furious"),
    ("scared", "terrified"),
    ("cold", "freezing"),
    ("hot", "boiling"),
];

fn stronger_adjective(caps: &Captures<'_>) -> Option<String> {
    lookup(STRONGER_ADJECTIVES, &caps[1]).map(str::to_string)
}

fn drop_redundant_adverb(caps: &Captures<'_>) -> Option<String> {
    let verb = caps[1].to_lowercase();
    let adverb = caps[2].to_lowercase();
    let redundant = (verb.starts_with("return") && adverb == "back")
        || (verb.starts_with("repeat") && adverb == "again");
    redundant.then(|| caps[1].to_string())
}

const PLURAL_VERBS: &[(&str, &str)] = &[("is", "are"), ("was", "were"), ("has", "have")];

fn plural_verb(caps: &Captures<'_>) -> Option<String> {
    let verb = lookup(PLURAL_VERBS, &caps[2])?;
    Some(format!("{} {}", &caps[1], verb))
}

fn age_with_be(caps: &Captures<'_>) -> Option<String> {
    let pronoun = &caps[1];
    let be = match pronoun.to_lowercase().as_str() {
        "i" => "am",
        "he" | "she" => "is",
        _ => "are",
    };
    Some(format!("{} {} {} years old", pronoun, be, &caps[3]))
}

fn look_forward_to_ing(caps: &Captures<'_>) -> Option<String> {
    let look = &caps[1];
    let verb = &caps[2];
    Some(format!("{} forward to {}ing", look, verb))
}

use Category::*;
use Severity::*;

/// The built-in rule table, in priority order (earlier wins ties).
pub const BUILTIN_RULES: &[RuleSpec] = &[
    RuleSpec::new(
        "article-a-silent-h",
        Grammar,
        Medium,
        r"(?i)\b(a)\s+(hour|hours|honest|honestly|honour|honor|honourable|honorable|heir)\b",
        Fix::Template("an $2"),
        "Use \"an\" before a silent h",
        "Words like \"hour\" and \"honest\" start with a vowel sound, so they take \"an\".",
    ),
    RuleSpec::new(
        "article-an-before-vowel",
        Grammar,
        Medium,
        r"(?i)\b(a)\s+([aeiou][a-z]*)\b",
        Fix::Compute(an_before_vowel),
        "Use \"an\" before a vowel sound",
        "\"A\" becomes \"an\" when the next word starts with a vowel sound: an apple, an idea.",
    )
    .confidence(0.85),
    RuleSpec::new(
        "article-a-before-consonant",
        Grammar,
        Medium,
        r"(?i)\b(an)\s+([bcdfgjklmnpqrstvwxyz][a-z]*)\b",
        Fix::Compute(a_before_consonant),
        "Use \"a\" before a consonant sound",
        "\"An\" is only used before vowel sounds. Before consonant sounds use \"a\": a book, a car.",
    )
    .confidence(0.85),
    RuleSpec::new(
        "uncountable-plural",
        Grammar,
        Medium,
        r"(?i)\b(informations|advices|furnitures|equipments|homeworks|knowledges|luggages|baggages|feedbacks|softwares)\b",
        Fix::Compute(strip_plural),
        "This noun is uncountable",
        "Uncountable nouns have no plural form. Say \"some information\" or \"a piece of advice\".",
    ),
    RuleSpec::new(
        "double-comparative",
        Grammar,
        Medium,
        r"(?i)\bmore\s+(better|worse|easier|harder|bigger|smaller|faster|slower|happier|cheaper|older|younger)\b",
        Fix::Template("$1"),
        "Double comparative",
        "The comparative form already means \"more\". Say \"better\", not \"more better\".",
    ),
    RuleSpec::new(
        "modal-of",
        Grammar,
        High,
        r"(?i)\b(could|should|would|must|might)\s+of\b",
        Fix::Template("$1 have"),
        "Use \"have\" after a modal verb",
        "\"Could of\" comes from how \"could've\" sounds. The correct form is \"could have\".",
    ),
    RuleSpec::new(
        "modal-to",
        Grammar,
        High,
        r"(?i)\b(can|could|must|should|would|might|may)\s+to\s+([a-z]+)\b",
        Fix::Template("$1 $2"),
        "No \"to\" after a modal verb",
        "Modal verbs are followed by the bare infinitive: \"I can swim\", not \"I can to swim\".",
    ),
    RuleSpec::new(
        "dont-third-person",
        Grammar,
        High,
        r"(?i)\b(he|she|it)\s+don['’]t\b",
        Fix::Template("$1 doesn't"),
        "Use \"doesn't\" with he, she and it",
        "In the present simple, he/she/it take \"does\": \"she doesn't know\".",
    ),
    RuleSpec::new(
        "base-form-after-do",
        Grammar,
        High,
        r"(?i)\b(didn['’]t|did\s+not|doesn['’]t|does\s+not|don['’]t|do\s+not)\s+(went|came|saw|had|made|took|gave|wrote|ate|bought|said|knew|thought|felt|found|left|got|told)\b",
        Fix::Compute(base_after_do),
        "Use the base form after do/did",
        "The auxiliary already carries the tense, so the main verb stays in its base form: \"I didn't go\".",
    ),
    RuleSpec::new(
        "people-plural-verb",
        Grammar,
        High,
        r"(?i)\b(people|children|police)\s+(is|was|has)\b",
        Fix::Compute(plural_verb),
        "This noun takes a plural verb",
        "\"People\", \"children\" and \"police\" are plural: \"people are\", \"children were\".",
    ),
    RuleSpec::new(
        "be-agree-first-person",
        Grammar,
        High,
        r"(?i)\b(I)\s+am\s+(agree|disagree)\b",
        Fix::Template("$1 $2"),
        "\"Agree\" is a verb",
        "\"Agree\" is already a verb, so it does not need \"am\": \"I agree\".",
    ),
    RuleSpec::new(
        "be-agree-plural",
        Grammar,
        High,
        r"(?i)\b(we|you|they)\s+are\s+(agree|disagree)\b",
        Fix::Template("$1 $2"),
        "\"Agree\" is a verb",
        "\"Agree\" is already a verb, so it does not need \"are\": \"we agree\".",
    ),
    RuleSpec::new(
        "be-agree-third-person",
        Grammar,
        High,
        r"(?i)\b(he|she)\s+is\s+(agree|disagree)\b",
        Fix::Template("$1 ${2}s"),
        "\"Agree\" is a verb",
        "\"Agree\" is already a verb, so it does not need \"is\": \"she agrees\".",
    ),
    RuleSpec::new(
        "age-with-have",
        Grammar,
        High,
        r"(?i)\b(I|he|she|you|we|they)\s+(have|has)\s+(\d{1,3})\s+years\s+old\b",
        Fix::Compute(age_with_be),
        "Use \"be\" for age",
        "English uses \"be\" for age: \"I am 20 years old\".",
    ),
    RuleSpec::new(
        "their-there",
        Grammar,
        High,
        r"(?i)\b(their)\s+(is|are|was|were)\b",
        Fix::Template("there $2"),
        "\"There\", not \"their\"",
        "\"Their\" shows possession. To say something exists use \"there is\" or \"there are\".",
    ),
    RuleSpec::new(
        "than-then",
        Grammar,
        Medium,
        r"(?i)\b(better|worse|more|less|bigger|smaller|faster|older|younger|higher|lower|rather)\s+then\b",
        Fix::Template("$1 than"),
        "\"Than\" for comparisons",
        "\"Than\" compares things. \"Then\" is about time.",
    ),
    RuleSpec::new(
        "since-duration",
        Grammar,
        Medium,
        r"(?i)\bsince\s+((?:\d+|one|two|three|four|five|six|seven|eight|nine|ten|many|several|a\s+few)\s+(?:years?|months?|weeks?|days?|hours?|minutes?))\b",
        Fix::Template("for $1"),
        "Use \"for\" with a length of time",
        "\"Since\" goes with a starting point (since 2019). \"For\" goes with a duration (for three years).",
    ),
    RuleSpec::new(
        "every-plural",
        Grammar,
        Medium,
        r"(?i)\bevery\s+(days|weeks|months|years|times|persons|people|students)\b",
        Fix::Compute(every_singular),
        "\"Every\" takes a singular noun",
        "\"Every\" refers to each single item, so the noun is singular: \"every day\".",
    ),
    RuleSpec::new(
        "much-countable",
        Grammar,
        Medium,
        r"(?i)\bmuch\s+(people|friends|books|students|things|cars|problems|questions|mistakes|children|countries)\b",
        Fix::Template("many $1"),
        "Use \"many\" with countable nouns",
        "\"Much\" is for uncountable nouns (much water). Countable plurals take \"many\".",
    ),
    RuleSpec::new(
        "less-countable",
        Grammar,
        Low,
        r"(?i)\bless\s+(people|friends|books|students|things|cars|problems|questions|mistakes|children|countries)\b",
        Fix::Template("fewer $1"),
        "Use \"fewer\" with countable nouns",
        "In careful writing, \"fewer\" goes with things you can count and \"less\" with amounts.",
    )
    .confidence(0.7)
    .min_level(ProficiencyLevel::Intermediate),
    RuleSpec::new(
        "look-forward-to-ing",
        Grammar,
        Medium,
        r"(?i)\b(look|looks|looking|looked)\s+forward\s+to\s+(see|meet|hear|work|visit)\b",
        Fix::Compute(look_forward_to_ing),
        "Use -ing after \"look forward to\"",
        "In \"look forward to\", \"to\" is a preposition, so the verb takes -ing: \"I look forward to meeting you\".",
    ),
    RuleSpec::new(
        "discuss-about",
        Grammar,
        Medium,
        r"(?i)\b(discuss(?:es|ed|ing)?)\s+about\b",
        Fix::Template("$1"),
        "\"Discuss\" needs no preposition",
        "\"Discuss\" takes a direct object: \"we discussed the plan\".",
    ),
    RuleSpec::new(
        "explain-to",
        Grammar,
        Medium,
        r"(?i)\b(explain(?:s|ed|ing)?)\s+(me|him|her|us)\b",
        Fix::Template("$1 to $2"),
        "Use \"explain to\"",
        "You explain something to someone: \"Can you explain it to me?\"",
    )
    .confidence(0.8),
    RuleSpec::new(
        "depend-on",
        Vocabulary,
        Medium,
        r"(?i)\b(depend(?:s|ed|ing)?)\s+(?:of|from)\b",
        Fix::Template("$1 on"),
        "Use \"depend on\"",
        "The verb \"depend\" is followed by \"on\".",
    ),
    RuleSpec::new(
        "married-to",
        Vocabulary,
        Medium,
        r"(?i)\b(married)\s+with\b",
        Fix::Template("$1 to"),
        "Use \"married to\"",
        "You are married to someone, not with them.",
    )
    .confidence(0.8),
    RuleSpec::new(
        "on-the-other-hand",
        Vocabulary,
        Medium,
        r"(?i)\bin\s+the\s+other\s+hand\b",
        Fix::Template("on the other hand"),
        "Fixed expression",
        "The linking phrase is \"on the other hand\".",
    ),
    RuleSpec::new(
        "take-a-photo",
        Vocabulary,
        Medium,
        r"(?i)\b(make|makes|made|making)\s+(a\s+)?(photos?|pictures?)\b",
        Fix::Compute(take_a_photo),
        "Use \"take\" a photo",
        "In English you take a photo, you do not make one.",
    ),
    RuleSpec::new(
        "make-a-mistake",
        Vocabulary,
        Medium,
        r"(?i)\b(do|does|did|doing|done)\s+(a\s+mistake|mistakes|many\s+mistakes|a\s+lot\s+of\s+mistakes)\b",
        Fix::Compute(make_a_mistake),
        "Use \"make\" a mistake",
        "The collocation is \"make a mistake\".",
    ),
    RuleSpec::new(
        "alot",
        Spelling,
        Medium,
        r"(?i)\balot\b",
        Fix::Template("a lot"),
        "\"A lot\" is two words",
        "",
    ),
    RuleSpec::new(
        "your-welcome",
        Spelling,
        Medium,
        r"(?i)\byour\s+welcome\b",
        Fix::Template("you're welcome"),
        "\"You're\" = \"you are\"",
        "\"Your\" shows possession. The reply to \"thank you\" is \"you're welcome\".",
    ),
    RuleSpec::new(
        "informal-contraction",
        Style,
        Low,
        r"(?i)\b(gonna|wanna|gotta|kinda|sorta)\b",
        Fix::Compute(formal_form),
        "Informal spoken form",
        "These forms are fine in chat but too informal for most writing.",
    ),
    RuleSpec::new(
        "according-to-me",
        Style,
        Low,
        r"(?i)\baccording\s+to\s+me\b",
        Fix::Template("in my opinion"),
        "Say \"in my opinion\"",
        "\"According to\" introduces someone else's view. For your own, use \"in my opinion\".",
    ),
    RuleSpec::new(
        "redundant-adverb",
        Style,
        Low,
        r"(?i)\b(return|returns|returned|returning|repeat|repeats|repeated|repeating)\s+(back|again)\b",
        Fix::Compute(drop_redundant_adverb),
        "Redundant word",
        "\"Return\" already means go back and \"repeat\" already means do again.",
    ),
    RuleSpec::new(
        "weak-intensifier",
        Vocabulary,
        Info,
        r"(?i)\bvery\s+(good|bad|big|small|happy|sad|tired|important|beautiful|interesting|hungry|angry|scared|cold|hot)\b",
        Fix::Compute(stronger_adjective),
        "Try a stronger word",
        "One precise adjective often reads better than \"very\" + a common one.",
    )
    .confidence(0.6)
    .min_level(ProficiencyLevel::Intermediate),
    RuleSpec::new(
        "space-before-punctuation",
        Punctuation,
        Low,
        r"[ \t]+([,.;:!?])",
        Fix::Template("$1"),
        "No space before punctuation",
        "In English, commas, periods and question marks follow the word directly.",
    ),
    RuleSpec::new(
        "space-after-comma",
        Punctuation,
        Low,
        r",([A-Za-z])",
        Fix::Template(", $1"),
        "Add a space after the comma",
        "",
    ),
    RuleSpec::new(
        "repeated-spaces",
        Punctuation,
        Info,
        r"\b {2,}\b",
        Fix::Template(" "),
        "Extra spaces",
        "",
    ),
];
