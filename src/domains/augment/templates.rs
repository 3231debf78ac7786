//! Per-service Python fragments inserted by the augmenter.
//!
//! Fragments are stored without base indentation; [`indent`] applies the
//! indentation of the declaration being rewritten.

use crate::core::Service;

/// Parameters that mark a declaration as already augmented.
pub const RESERVED_PARAMS: [&str; 3] = ["auth_token", "jira_url", "confluence_url"];

/// Parameters the block introduces besides the reserved ones. A declaration
/// already using one of these cannot take the block without a duplicate.
pub const CONFLICTING_PARAMS: [&str; 2] = ["auth_type", "username"];

/// Rendered fragments for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    /// The Auth Parameter Block, one parameter per group of lines.
    pub param_block: String,
    /// Statement that unconditionally acquires the session fetcher.
    pub fetcher_call: String,
    /// Replacement for `fetcher_call`.
    pub fallback: String,
}

impl Templates {
    pub fn for_service(service: Service) -> Self {
        let (example_url, fetcher_var, fetcher_type) = match service {
            Service::Jira => ("https://mycompany.atlassian.net", "jira", "JiraFetcher"),
            Service::Confluence => (
                "https://mycompany.atlassian.net/wiki",
                "confluence_fetcher",
                "ConfluenceFetcher",
            ),
        };
        let url_param = service.url_param();
        let fetcher_call = format!(
            "{} = await get_{}_fetcher(ctx)",
            fetcher_var,
            service.as_str()
        );

        let param_block = [
            optional_param(
                url_param,
                "str | None",
                &format!(
                    "(Optional) {} instance URL (e.g., '{}'). If not provided, uses environment variable {}_URL.",
                    service.display_name(),
                    example_url,
                    service.env_prefix()
                ),
            ),
            optional_param(
                "auth_token",
                "str | None",
                "(Optional) Authentication token (OAuth token, PAT, or API token). If not provided, uses environment variable credentials.",
            ),
            optional_param(
                "auth_type",
                "Literal[\"oauth\", \"pat\", \"basic\"] | None",
                "(Optional) Authentication type. Required if auth_token is provided. Choices: 'oauth', 'pat', 'basic'.",
            ),
            optional_param(
                "username",
                "str | None",
                "(Optional) Username/email (required only for 'basic' auth type)",
            ),
        ]
        .join("\n");

        let fallback = format!(
            "# Use provided credentials if all required parameters are present
if {url} and auth_token and auth_type:
    config = build_{svc}_config_from_params(
        {url}={url},
        auth_token=auth_token,
        auth_type=auth_type,
        username=username,
    )
    {var} = {ty}(config=config)
else:
    {call}",
            url = url_param,
            svc = service.as_str(),
            var = fetcher_var,
            ty = fetcher_type,
            call = fetcher_call,
        );

        Self {
            param_block,
            fetcher_call,
            fallback,
        }
    }
}

fn optional_param(name: &str, annotation: &str, description: &str) -> String {
    format!(
        "{name}: Annotated[
    {annotation},
    Field(
        description=\"{description}\",
        default=None,
    ),
] = None,"
    )
}

/// Prefix every non-empty line of `text` with `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jira_param_block_order() {
        let templates = Templates::for_service(Service::Jira);
        let positions: Vec<usize> = ["jira_url:", "auth_token:", "auth_type:", "username:"]
            .iter()
            .map(|name| templates.param_block.find(name).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(templates.param_block.ends_with("] = None,"));
        assert!(templates.param_block.contains("environment variable JIRA_URL"));
    }

    #[test]
    fn test_confluence_fallback() {
        let templates = Templates::for_service(Service::Confluence);
        assert_eq!(
            templates.fetcher_call,
            "confluence_fetcher = await get_confluence_fetcher(ctx)"
        );
        assert!(templates
            .fallback
            .starts_with("# Use provided credentials"));
        assert!(templates
            .fallback
            .contains("if confluence_url and auth_token and auth_type:"));
        assert!(templates
            .fallback
            .contains("confluence_fetcher = ConfluenceFetcher(config=config)"));
        assert!(templates
            .fallback
            .ends_with("else:\n    confluence_fetcher = await get_confluence_fetcher(ctx)"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\n\n  b", "    "), "    a\n\n      b");
    }
}
