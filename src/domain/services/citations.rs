#[cfg(test)]
#[path = "citations_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::CitationSource;
use crate::domain::models::CitationStyle;
use crate::domain::models::ClipboardWriter;
use crate::domain::models::Notification;

fn field(value: &Option<String>) -> Option<&str> {
    return value.as_deref().filter(|e| return !e.is_empty());
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    return field(value).unwrap_or(placeholder);
}

fn with_suffix(value: &Option<String>, suffix: &str) -> String {
    return field(value)
        .map(|e| return format!("{e}{suffix}"))
        .unwrap_or_default();
}

fn with_prefix(value: &Option<String>, prefix: &str) -> String {
    return field(value)
        .map(|e| return format!("{prefix}{e}"))
        .unwrap_or_default();
}

pub struct CitationFormatter {}

impl CitationFormatter {
    /// Renders a citation. Missing authors, year, title, and for Harvard the
    /// publisher, are shown as bracketed placeholders. Other missing fields are
    /// left out.
    pub fn format(style: CitationStyle, source: &CitationSource) -> String {
        let authors = or_placeholder(&source.authors, "[Author]");
        let year = or_placeholder(&source.year, "[Year]");
        let title = or_placeholder(&source.title, "[Title]");

        match style {
            CitationStyle::Apa => {
                let publisher = with_suffix(&source.publisher, ".");
                let link = match (field(&source.doi), field(&source.url)) {
                    (Some(doi), _) => format!("https://doi.org/{doi}"),
                    (None, Some(url)) => url.to_string(),
                    (None, None) => "".to_string(),
                };

                return format!("{authors}. ({year}). {title}. {publisher} {link}");
            }
            CitationStyle::Mla => {
                let publication = with_suffix(&source.publication, ", ");
                let publisher = with_suffix(&source.publisher, ", ");
                let pages = with_prefix(&source.pages, ", pp. ");

                return format!(
                    "{authors}. \"{title}.\" {publication}{publisher}{year}{pages}."
                );
            }
            CitationStyle::Chicago => {
                let location = with_suffix(&source.location, ": ");
                let publisher = with_suffix(&source.publisher, ", ");
                let pages = with_prefix(&source.pages, ", ");

                return format!("{authors}, {title} ({location}{publisher}{year}){pages}.");
            }
            CitationStyle::Harvard => {
                let location = with_suffix(&source.location, ": ");
                let publisher = or_placeholder(&source.publisher, "[Publisher]");
                let pages = with_prefix(&source.pages, ", p.");

                return format!("{authors} ({year}). {title}. {location}{publisher}{pages}.");
            }
        }
    }

    /// Formats a citation and places it on the clipboard. The outcome of the
    /// copy is reported as a notification, the formatted citation is returned
    /// either way.
    pub fn format_and_copy(
        style: CitationStyle,
        source: &CitationSource,
        clipboard: &dyn ClipboardWriter,
        tx: &mpsc::UnboundedSender<Notification>,
    ) -> Result<String> {
        let citation = CitationFormatter::format(style, source);

        if let Err(err) = clipboard.set_text(&citation) {
            tracing::warn!(err = ?err, style = %style, "Failed to copy citation");
            tx.send(Notification::error("Error", "Failed to copy citation"))?;
        } else {
            tx.send(Notification::success(
                "Success",
                "Citation copied to clipboard",
            ))?;
        }

        return Ok(citation);
    }
}
