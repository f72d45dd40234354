#[cfg(test)]
#[path = "citation_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
pub enum CitationStyle {
    #[strum(serialize = "APA")]
    Apa,
    #[strum(serialize = "MLA")]
    Mla,
    Chicago,
    Harvard,
}

impl CitationStyle {
    pub fn parse(text: &str) -> Option<CitationStyle> {
        return CitationStyle::iter().find(|e| return e.to_string().eq_ignore_ascii_case(text));
    }

    pub fn name(&self) -> &'static str {
        match self {
            CitationStyle::Apa => return "APA (7th edition)",
            CitationStyle::Mla => return "MLA (9th edition)",
            CitationStyle::Chicago => return "Chicago (17th edition)",
            CitationStyle::Harvard => return "Harvard",
        }
    }

    pub fn example(&self) -> &'static str {
        match self {
            CitationStyle::Apa => {
                return "Author, A. A. (Year). Title of work. Publisher. DOI or URL";
            }
            CitationStyle::Mla => {
                return "Author. \"Title of Source.\" Title of Container, Other contributors, Version, Number, Publisher, Publication Date, Location.";
            }
            CitationStyle::Chicago => {
                return "Author, Title of Book (Place of publication: Publisher, Year), page number.";
            }
            CitationStyle::Harvard => {
                return "Author, Initial. (Year). Title of book. City: Publisher, p.page number.";
            }
        }
    }
}

/// Source details entered by the user. Every field is optional and free form,
/// nothing is validated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationSource {
    pub authors: Option<String>,
    pub title: Option<String>,
    pub publication: Option<String>,
    pub year: Option<String>,
    pub publisher: Option<String>,
    pub location: Option<String>,
    pub pages: Option<String>,
    pub url: Option<String>,
    pub doi: Option<String>,
}
