//! Response classification
//!
//! Single linear pass over the transcript with one piece of carried state:
//! the life area the user most recently chose. Each user reply to a content
//! question is split into items, tagged with that life area and appended to
//! the list for the question's category.

use std::sync::OnceLock;

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::splitter::{SplitOptions, split_with};
use crate::types::{ClassificationResult, ConversationTurn, Item, LifeArea};

/// User phrases that choose a life area, in the order areas are appended
const LIFE_AREA_TABLE: &[(LifeArea, &str)] = &[
    (
        LifeArea::HealthSelfCare,
        r"focus on.*health|talk about.*health|health.*to start|health.*next",
    ),
    (
        LifeArea::PersonalGrowthLearning,
        r"focus on.*personal growth|talk about.*personal growth|personal growth.*next|focus on.*learning",
    ),
    (
        LifeArea::ProfessionalWork,
        r"focus on.*professional|focus on.*work|talk about.*work|work.*next|focus on.*career",
    ),
    (
        LifeArea::Relationships,
        r"focus on.*family|focus on.*relationship|talk about.*relationship|talk about.*family",
    ),
    (
        LifeArea::Finances,
        r"focus on.*financ|talk about.*financ|money.*next|focus on.*money",
    ),
    (LifeArea::Community, r"focus on.*community|talk about.*community"),
];

/// Conversation-control phrases; replies matching these carry no content
const COMPLETION_PATTERNS: &[&str] = &[
    r"final (interview )?summary",
    r"covers everything",
    r"that['’]?s all",
    r"i['’]?m done",
    r"finish (the |my )?(onboarding|interview)",
    r"complete (the |my )?(onboarding|interview)",
];

/// Quick-action phrases that steer the conversation without answering it
const STEERING_PATTERNS: &[&str] = &[r"add another (life )?area", r"add (a |one )?more (life )?areas?"];

struct AreaRule {
    area: LifeArea,
    regex: Regex,
}

static AREA_RULES: OnceLock<Vec<AreaRule>> = OnceLock::new();
static COMPLETION_REGEX: OnceLock<Regex> = OnceLock::new();
static STEERING_REGEX: OnceLock<Regex> = OnceLock::new();

fn area_rules() -> &'static [AreaRule] {
    AREA_RULES.get_or_init(|| {
        LIFE_AREA_TABLE
            .iter()
            .map(|(area, pattern)| AreaRule {
                area: *area,
                regex: RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("life area pattern must compile"),
            })
            .collect()
    })
}

fn completion_regex() -> &'static Regex {
    COMPLETION_REGEX.get_or_init(|| {
        RegexBuilder::new(&COMPLETION_PATTERNS.join("|"))
            .case_insensitive(true)
            .build()
            .expect("completion pattern must compile")
    })
}

fn steering_regex() -> &'static Regex {
    STEERING_REGEX.get_or_init(|| {
        RegexBuilder::new(&STEERING_PATTERNS.join("|"))
            .case_insensitive(true)
            .build()
            .expect("steering pattern must compile")
    })
}

/// Whether a user reply asks to wrap up the interview rather than answer a question
pub fn is_completion_request(text: &str) -> bool {
    completion_regex().is_match(text)
}

/// Whether a user reply only steers the conversation and carries no items
pub fn is_control_utterance(text: &str) -> bool {
    is_completion_request(text) || steering_regex().is_match(text)
}

/// Life areas named in a user reply, in table order
pub fn life_areas_in(text: &str) -> Vec<LifeArea> {
    area_rules()
        .iter()
        .filter(|rule| rule.regex.is_match(text))
        .map(|rule| rule.area)
        .collect()
}

/// Buckets interview replies into goals, habits and projects
#[derive(Debug, Clone, Default)]
pub struct ResponseClassifier {
    options: SplitOptions,
}

impl ResponseClassifier {
    pub fn new(options: SplitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Classify a transcript. Total over all inputs.
    pub fn classify(&self, transcript: &[ConversationTurn]) -> ClassificationResult {
        debug!("classify: {} turn(s)", transcript.len());

        let mut life_areas: Vec<LifeArea> = Vec::new();
        let mut current_area = LifeArea::Uncategorized;
        let mut result = ClassificationResult::default();

        for (index, turn) in transcript.iter().enumerate() {
            if !turn.is_user() {
                continue;
            }
            let text = turn.content.as_str();

            for area in life_areas_in(text) {
                if !life_areas.contains(&area) {
                    debug!("classify: turn {} selects life area {}", index, area);
                    life_areas.push(area);
                    current_area = area;
                }
            }

            if is_control_utterance(text) {
                debug!("classify: turn {} is a control utterance, skipping", index);
                continue;
            }

            let question_type = turn.effective_question_type();
            let Some(category) = question_type.category() else {
                debug!("classify: turn {} answers {}, no items", index, question_type);
                continue;
            };

            let items = split_with(text, &self.options);
            debug!(
                "classify: turn {} -> {} {:?} item(s) in {}",
                index,
                items.len(),
                category,
                current_area
            );
            result
                .list_mut(category)
                .extend(items.into_iter().map(|raw| Item::from_raw(raw, current_area, category)));
        }

        if !life_areas.is_empty() {
            result.life_areas = life_areas;
        }

        debug!(
            "classify: {} life area(s), {} item(s)",
            result.life_areas.len(),
            result.item_count()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, QuestionType};

    fn user(text: &str, question_type: QuestionType) -> ConversationTurn {
        ConversationTurn::user(text).with_question(question_type)
    }

    #[test]
    fn test_marathon_scenario() {
        let transcript = vec![
            ConversationTurn::assistant("Which areas would you like to focus on?"),
            user("I'd like to focus on health", QuestionType::LifeAreaSelection),
            ConversationTurn::assistant("What are your big goals this year?"),
            user("Run a marathon, read 12 books", QuestionType::YearlyGoals),
        ];

        let result = ResponseClassifier::default().classify(&transcript);

        assert_eq!(result.life_areas, vec![LifeArea::HealthSelfCare]);
        assert_eq!(result.yearly_goals.len(), 2);
        assert_eq!(result.yearly_goals[0].title, "Run a marathon");
        assert_eq!(result.yearly_goals[1].title, "read 12 books");
        for goal in &result.yearly_goals {
            assert_eq!(goal.life_area, LifeArea::HealthSelfCare);
            assert_eq!(goal.category, Category::YearlyGoal);
        }
        assert!(result.quarterly_goals.is_empty());
        assert!(result.habits.is_empty());
        assert!(result.projects.is_empty());
    }

    #[test]
    fn test_empty_transcript() {
        let result = ResponseClassifier::default().classify(&[]);
        assert_eq!(result, ClassificationResult::default());
    }

    #[test]
    fn test_default_life_area_when_none_selected() {
        let transcript = vec![user("Meditate every morning", QuestionType::Habits)];
        let result = ResponseClassifier::default().classify(&transcript);

        assert_eq!(result.life_areas, vec![LifeArea::Uncategorized]);
        assert_eq!(result.habits.len(), 1);
        assert_eq!(result.habits[0].life_area, LifeArea::Uncategorized);
    }

    #[test]
    fn test_short_reply_contributes_nothing() {
        let transcript = vec![user("ok", QuestionType::Habits)];
        let result = ResponseClassifier::default().classify(&transcript);
        assert!(result.habits.is_empty());
    }

    #[test]
    fn test_completion_request_excluded_regardless_of_question_type() {
        let text = "I think that covers everything, let's do the final summary";
        for question_type in QuestionType::ALL {
            let result = ResponseClassifier::default().classify(&[user(text, question_type)]);
            assert_eq!(result.item_count(), 0, "{question_type} produced items");
        }
    }

    #[test]
    fn test_general_and_unset_turns_contribute_nothing() {
        let transcript = vec![
            user("Just browsing around here", QuestionType::General),
            ConversationTurn::user("No stamp on this reply at all"),
        ];
        let result = ResponseClassifier::default().classify(&transcript);
        assert_eq!(result.item_count(), 0);
    }

    #[test]
    fn test_assistant_turns_are_ignored() {
        let mut turn = ConversationTurn::assistant("I'd focus on health, run a marathon");
        turn.question_type = Some(QuestionType::YearlyGoals);
        let result = ResponseClassifier::default().classify(&[turn]);
        assert_eq!(result, ClassificationResult::default());
    }

    #[test]
    fn test_life_area_switches_between_sections() {
        let transcript = vec![
            user("Let's focus on health", QuestionType::LifeAreaSelection),
            user("Walk 10k steps daily", QuestionType::Habits),
            user("Now I want to talk about finances", QuestionType::General),
            user("Build an emergency fund", QuestionType::Projects),
        ];
        let result = ResponseClassifier::default().classify(&transcript);

        assert_eq!(result.life_areas, vec![LifeArea::HealthSelfCare, LifeArea::Finances]);
        assert_eq!(result.habits[0].life_area, LifeArea::HealthSelfCare);
        assert_eq!(result.projects[0].life_area, LifeArea::Finances);
    }

    #[test]
    fn test_repeated_area_is_not_duplicated() {
        let transcript = vec![
            user("focus on health please", QuestionType::LifeAreaSelection),
            user("focus on health again", QuestionType::LifeAreaSelection),
        ];
        let result = ResponseClassifier::default().classify(&transcript);
        assert_eq!(result.life_areas, vec![LifeArea::HealthSelfCare]);
    }

    #[test]
    fn test_area_detected_even_without_selection_stamp() {
        let transcript = vec![user("I want to focus on my career this year", QuestionType::General)];
        let result = ResponseClassifier::default().classify(&transcript);
        assert_eq!(result.life_areas, vec![LifeArea::ProfessionalWork]);
    }

    #[test]
    fn test_each_category_routes_to_its_list() {
        let transcript = vec![
            user("Get promoted", QuestionType::YearlyGoals),
            user("Finish the certification course", QuestionType::QuarterlyGoals),
            user("Journal nightly", QuestionType::Habits),
            user("Kitchen remodel", QuestionType::Projects),
        ];
        let result = ResponseClassifier::default().classify(&transcript);

        assert_eq!(result.yearly_goals[0].title, "Get promoted");
        assert_eq!(result.quarterly_goals[0].title, "Finish the certification course");
        assert_eq!(result.habits[0].title, "Journal nightly");
        assert_eq!(result.projects[0].title, "Kitchen remodel");
    }

    #[test]
    fn test_long_goal_truncated_title() {
        let text = "x".repeat(200);
        let result = ResponseClassifier::default().classify(&[user(&text, QuestionType::YearlyGoals)]);

        assert_eq!(result.yearly_goals.len(), 1);
        assert_eq!(result.yearly_goals[0].title, "x".repeat(100));
        assert_eq!(result.yearly_goals[0].description, text);
    }

    #[test]
    fn test_completion_request_patterns() {
        assert!(is_completion_request("That's all for now"));
        assert!(is_completion_request("that’s all"));
        assert!(is_completion_request("I'm done"));
        assert!(is_completion_request("Can you create my final interview summary?"));
        assert!(is_completion_request("please finish onboarding"));
        assert!(!is_completion_request("Complete a half marathon"));
        assert!(!is_completion_request("Finish my thesis"));
    }

    #[test]
    fn test_add_area_request_is_not_content() {
        assert!(is_control_utterance("I'd like to add another life area"));
        assert!(is_control_utterance("Can we add one more area?"));
        assert!(!is_completion_request("I'd like to add another life area"));
        assert!(!is_control_utterance("Add more vegetables to dinner"));

        let result = ResponseClassifier::default().classify(&[
            user("I'd like to add another life area", QuestionType::Habits),
            user("Meditate daily", QuestionType::Habits),
        ]);
        assert_eq!(result.habits.len(), 1);
        assert_eq!(result.habits[0].title, "Meditate daily");
    }

    #[test]
    fn test_life_areas_in_table_order() {
        let areas = life_areas_in("I want to focus on finances and health");
        assert_eq!(areas, vec![LifeArea::HealthSelfCare, LifeArea::Finances]);
        assert!(life_areas_in("nothing relevant").is_empty());
    }

    #[test]
    fn test_custom_split_options_are_used() {
        let classifier = ResponseClassifier::new(SplitOptions {
            max_items: 1,
            ..Default::default()
        });
        let result = classifier.classify(&[user("Run a marathon, read 12 books", QuestionType::YearlyGoals)]);
        assert_eq!(result.yearly_goals.len(), 1);
        assert_eq!(classifier.options().max_items, 1);
    }
}
