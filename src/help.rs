//! Offline help assistant: a fixed FAQ catalog and a small per-session
//! navigation state machine.

use crate::constants::HELP_HISTORY_SHOWN;
use crate::models::HelpAction;

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub struct FaqCategory {
    pub name: &'static str,
    pub entries: &'static [Faq],
}

pub const FAQ_CATALOG: &[FaqCategory] = &[
    FaqCategory {
        name: "Flood Risk Info",
        entries: &[
            Faq {
                question: "What is Flood Risk?",
                answer: "Flood risk indicates the potential danger of flooding in your area based on historical data and weather patterns.",
            },
            Faq {
                question: "How to check if my city is flood-prone?",
                answer: "You can check historical flood data and local government flood maps to know if your city is prone to floods.",
            },
            Faq {
                question: "Which areas in India are highly flood-prone?",
                answer: "Some areas like Assam, Bihar, West Bengal, Odisha and Uttar Pradesh are historically flood-prone.",
            },
        ],
    },
    FaqCategory {
        name: "Safety Measures",
        entries: &[
            Faq {
                question: "Before a Flood",
                answer: "Prepare emergency kit, secure important documents, plan evacuation routes, and stay updated with weather alerts.",
            },
            Faq {
                question: "During a Flood",
                answer: "Move to higher ground, avoid walking or driving through flood waters, follow official evacuation orders.",
            },
            Faq {
                question: "After a Flood",
                answer: "Avoid floodwater, check for damages, follow local authority instructions, and stay healthy.",
            },
        ],
    },
    FaqCategory {
        name: "Flood Prediction Project",
        entries: &[
            Faq {
                question: "How does the project work?",
                answer: "Our project uses live weather data and location info to predict flood risk for cities across India.",
            },
            Faq {
                question: "How to use the app?",
                answer: "Enter your city, check weather parameters, and the app will show flood risk (Safe/Danger) along with guidance.",
            },
            Faq {
                question: "Which factors are considered for prediction?",
                answer: "Rainfall, river proximity, dams, humidity, temperature, and cloud cover are used for flood prediction.",
            },
        ],
    },
    FaqCategory {
        name: "Emergency Contacts",
        entries: &[
            Faq {
                question: "Who to call in flood emergency?",
                answer: "Contact local authorities, National Disaster Management Helpline: 1070, or local police and fire department.",
            },
            Faq {
                question: "Local flood support centers",
                answer: "Visit your municipal website or contact state disaster management offices for local flood relief centers.",
            },
        ],
    },
    FaqCategory {
        name: "Tips & Awareness",
        entries: &[
            Faq {
                question: "Flood Safety Tips",
                answer: "Keep emergency kit ready, avoid low-lying areas, store drinking water, and follow official alerts.",
            },
            Faq {
                question: "Awareness Resources",
                answer: "Check government websites for flood awareness guidelines and educational videos.",
            },
        ],
    },
];

pub fn find_category(name: &str) -> Option<&'static FaqCategory> {
    FAQ_CATALOG.iter().find(|c| c.name == name)
}

impl FaqCategory {
    pub fn find(&self, question: &str) -> Option<&'static Faq> {
        self.entries.iter().find(|f| f.question == question)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HelpState {
    #[default]
    NoCategory,
    Category(&'static str),
    Question {
        category: &'static str,
        question: &'static str,
    },
}

/// Everything the assistant remembers about one session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HelpSession {
    pub state: HelpState,
    /// "category -> question", oldest first, at most the last 10
    pub history: Vec<String>,
}

impl HelpSession {
    /// Apply `action` and return the next session record.
    ///
    /// Actions that do not fit the current state (unknown names, picking a
    /// question with no category) leave the session unchanged.
    pub fn apply(mut self, action: &HelpAction) -> Self {
        match action {
            HelpAction::Show => {}
            HelpAction::Reset => self.state = HelpState::NoCategory,
            HelpAction::SelectCategory { category } => {
                if self.state == HelpState::NoCategory {
                    if let Some(c) = find_category(category) {
                        self.state = HelpState::Category(c.name);
                    }
                }
            }
            HelpAction::SelectQuestion { question } => {
                if let HelpState::Category(name) = self.state {
                    if let Some(faq) = find_category(name).and_then(|c| c.find(question)) {
                        self.history.push(format!("{} -> {}", name, faq.question));
                        if self.history.len() > HELP_HISTORY_SHOWN {
                            let excess = self.history.len() - HELP_HISTORY_SHOWN;
                            self.history.drain(..excess);
                        }
                        self.state = HelpState::Question {
                            category: name,
                            question: faq.question,
                        };
                    }
                }
            }
        }
        self
    }

    pub fn answer(&self) -> Option<&'static str> {
        match self.state {
            HelpState::Question { category, question } => {
                find_category(category).and_then(|c| c.find(question)).map(|f| f.answer)
            }
            _ => None,
        }
    }
}
