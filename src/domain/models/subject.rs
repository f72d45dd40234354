#[cfg(test)]
#[path = "subject_test.rs"]
mod tests;

#[derive(Debug, PartialEq, Eq)]
pub struct Subject {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct SampleQuery {
    pub subject: &'static str,
    pub text: &'static str,
}

pub const DEFAULT_SUBJECT: &str = "general";

static SUBJECTS: [Subject; 5] = [
    Subject {
        id: "general",
        name: "General",
        description: "General academic inquiries and assistance",
    },
    Subject {
        id: "literature",
        name: "Literature & Writing",
        description: "Essay structure, literary analysis, creative writing",
    },
    Subject {
        id: "stem",
        name: "STEM",
        description: "Mathematics, physics, chemistry, biology, computer science",
    },
    Subject {
        id: "humanities",
        name: "Humanities & Social Sciences",
        description: "History, philosophy, psychology, sociology, economics",
    },
    Subject {
        id: "research",
        name: "Research Methods",
        description: "Research design, data analysis, methodology",
    },
];

static SAMPLE_QUERIES: [SampleQuery; 5] = [
    SampleQuery {
        subject: "general",
        text: "How do I structure an academic argument?",
    },
    SampleQuery {
        subject: "literature",
        text: "Analyze the themes in Shakespeare's Hamlet",
    },
    SampleQuery {
        subject: "stem",
        text: "Explain the concept of quantum entanglement",
    },
    SampleQuery {
        subject: "humanities",
        text: "What caused the French Revolution?",
    },
    SampleQuery {
        subject: "research",
        text: "How to design a qualitative research study?",
    },
];

const MAX_SAMPLE_QUERIES: usize = 3;

pub struct SubjectCatalog {}

impl SubjectCatalog {
    pub fn list() -> &'static [Subject] {
        return &SUBJECTS;
    }

    pub fn ids() -> Vec<&'static str> {
        return SUBJECTS.iter().map(|subject| return subject.id).collect();
    }

    pub fn lookup(id: &str) -> Option<&'static Subject> {
        return SUBJECTS.iter().find(|subject| return subject.id == id);
    }

    pub fn contains(id: &str) -> bool {
        return SubjectCatalog::lookup(id).is_some();
    }

    /// Suggested prompts for a subject. General prompts always apply.
    pub fn sample_queries(subject_id: &str) -> Vec<&'static SampleQuery> {
        return SAMPLE_QUERIES
            .iter()
            .filter(|query| {
                return query.subject == DEFAULT_SUBJECT || query.subject == subject_id;
            })
            .take(MAX_SAMPLE_QUERIES)
            .collect();
    }
}
