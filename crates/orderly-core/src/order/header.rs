//! Date and client recovery from the first two lines of an order form.

use super::Result;
use crate::error::DocumentError;
use crate::models::config::MarkerConfig;
use crate::models::order::LogicalLine;

/// Date and client shared by every row of one order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHeader {
    pub date: String,
    pub client: String,
}

/// Parses the header lines with the configured prefixes.
#[derive(Debug, Clone)]
pub struct HeaderParser {
    date_prefix: String,
    client_prefix: String,
}

/// Drop the blank fragments form generators emit between header spans.
fn non_empty(line: &LogicalLine) -> Vec<&str> {
    line.fragments
        .iter()
        .map(String::as_str)
        .filter(|f| !f.is_empty() && *f != " ")
        .collect()
}

impl HeaderParser {
    pub fn new(date_prefix: impl Into<String>, client_prefix: impl Into<String>) -> Self {
        Self {
            date_prefix: date_prefix.into(),
            client_prefix: client_prefix.into(),
        }
    }

    /// Create a parser from the configured markers.
    pub fn from_markers(markers: &MarkerConfig) -> Self {
        Self::new(markers.date_prefix.clone(), markers.client_prefix.clone())
    }

    /// Parse the header of `document` from its assembled lines.
    ///
    /// The third line (the table heading) is not inspected.
    pub fn parse(&self, lines: &[LogicalLine], document: &str) -> Result<OrderHeader> {
        let date_line = lines.first().ok_or_else(|| DocumentError::MissingLine {
            document: document.to_string(),
            line: 1,
        })?;
        let date = self.parse_date_line(date_line, document)?;

        let client_line = lines.get(1).ok_or_else(|| DocumentError::MissingLine {
            document: document.to_string(),
            line: 2,
        })?;
        let client = self.parse_client_line(client_line, document)?;

        Ok(OrderHeader { date, client })
    }

    /// The date line must be exactly one fragment starting with the prefix.
    pub fn parse_date_line(&self, line: &LogicalLine, document: &str) -> Result<String> {
        let value = match line.fragments.as_slice() {
            [only] => only.strip_prefix(self.date_prefix.as_str()),
            _ => None,
        };
        value.map(str::to_string).ok_or_else(|| DocumentError::MissingDate {
            document: document.to_string(),
        })
    }

    /// The client line must reduce to one non-blank fragment starting with
    /// the prefix.
    pub fn parse_client_line(&self, line: &LogicalLine, document: &str) -> Result<String> {
        let fragments = non_empty(line);
        let value = match fragments.as_slice() {
            [only] => only.strip_prefix(self.client_prefix.as_str()),
            _ => None,
        };
        value.map(str::to_string).ok_or_else(|| DocumentError::MissingClient {
            document: document.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(fragments: &[&str]) -> LogicalLine {
        LogicalLine {
            y: 0.0,
            fragments: fragments.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn parser() -> HeaderParser {
        HeaderParser::new("Date: ", "Client: ")
    }

    #[test]
    fn test_date_after_prefix() {
        let date = parser().parse_date_line(&line(&["Date: 2024-01-01"]), "a.pdf");
        assert_eq!(date, Ok("2024-01-01".to_string()));
    }

    #[test]
    fn test_date_line_with_two_fragments_fails() {
        let result = parser().parse_date_line(&line(&["Date: ", "2024-01-01"]), "a.pdf");
        assert_eq!(
            result,
            Err(DocumentError::MissingDate {
                document: "a.pdf".to_string()
            })
        );
    }

    #[test]
    fn test_date_line_without_prefix_fails() {
        let result = parser().parse_date_line(&line(&["Delivery 2024-01-01"]), "a.pdf");
        assert!(matches!(result, Err(DocumentError::MissingDate { .. })));
    }

    #[test]
    fn test_client_line_ignores_blank_fragments() {
        let client = parser().parse_client_line(&line(&["", "Client: Acme Deli", " "]), "a.pdf");
        assert_eq!(client, Ok("Acme Deli".to_string()));
    }

    #[test]
    fn test_client_line_with_extra_text_fails() {
        let result = parser().parse_client_line(&line(&["Client: Acme", "Deli"]), "a.pdf");
        assert!(matches!(result, Err(DocumentError::MissingClient { .. })));
    }

    #[test]
    fn test_parse_header_lines() {
        let lines = vec![
            line(&["Date: 2024-01-01"]),
            line(&["Client: Acme"]),
            line(&["#", "Qty", "Unit", "Product"]),
        ];
        let header = parser().parse(&lines, "a.pdf").unwrap();
        assert_eq!(
            header,
            OrderHeader {
                date: "2024-01-01".to_string(),
                client: "Acme".to_string()
            }
        );
    }

    #[test]
    fn test_missing_client_line() {
        let lines = vec![line(&["Date: 2024-01-01"])];
        assert_eq!(
            parser().parse(&lines, "a.pdf"),
            Err(DocumentError::MissingLine {
                document: "a.pdf".to_string(),
                line: 2
            })
        );
    }
}
