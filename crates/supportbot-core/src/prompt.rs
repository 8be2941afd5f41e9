//! Prompt builder for product questions.
//!
//! Formats the product catalog and conversation history into GitHub-flavored
//! markdown for the model. Layout of the user payload:
//!
//! ```text
//! ### Product catalog
//! | ID | Name | Category | Price | Description |
//! |---:|---|---|---:|---|
//! | ... |
//!
//! ### User request
//! {question, with conversation history embedded}
//!
//! ### Output format
//! ...
//! ```

use supportbot_types::catalog::Product;
use supportbot_types::chat::{ChatMessage, ChatRole};

/// Maximum number of catalog entries rendered into a prompt.
pub const PRODUCT_LIMIT: usize = 60;

/// Default number of history entries carried into a prompt.
pub const HISTORY_WINDOW: usize = 10;

/// Sentinel emitted instead of a table when no product can be rendered.
pub const EMPTY_CATALOG: &str = "Product catalog is empty.";

const TABLE_HEADER: &str = "| ID | Name | Category | Price | Description |\n|---:|---|---|---:|---|";

/// Fixed style contract sent as the system prompt.
pub fn support_agent_system_prompt() -> &'static str {
    "You are a smart customer support assistant. \
     You must respond in clean GitHub-flavored Markdown. \
     Be concise, friendly, and actionable.\n\n\
     Style rules:\n\
     - Prefer short sections with headings (###).\n\
     - Use bullet points for key facts.\n\
     - Use tables when comparing multiple products.\n\
     - Do not invent facts. If information is missing, ask 1-2 clarifying questions.\n\
     - Always end with a '### Next steps' section, unless the user only said hi.\n\
     - Keep answers under ~180 words unless the user asks for detail.\n"
}

/// Escape a value for use inside a markdown table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").trim().to_string()
}

fn product_row(product: &Product) -> Option<String> {
    if !product.is_renderable() {
        return None;
    }
    Some(format!(
        "| {} | {} | {} | {} | {} |",
        escape_cell(&product.id),
        escape_cell(&product.name),
        escape_cell(&product.category),
        escape_cell(&product.price),
        escape_cell(&product.description),
    ))
}

/// Render up to [`PRODUCT_LIMIT`] products as a markdown table.
///
/// Entries missing an id or name are skipped. If nothing renders, returns
/// exactly [`EMPTY_CATALOG`].
pub fn build_products_context(products: &[Product]) -> String {
    let rows: Vec<String> = products
        .iter()
        .take(PRODUCT_LIMIT)
        .filter_map(product_row)
        .collect();

    if rows.is_empty() {
        return EMPTY_CATALOG.to_string();
    }

    format!("### Product catalog\n{TABLE_HEADER}\n{}", rows.join("\n"))
}

/// Render the most recent `last_n` messages as a markdown transcript, newest first.
///
/// Entries with blank content are skipped.
pub fn build_conversation_context(messages: &[ChatMessage], last_n: usize) -> String {
    let start = messages.len().saturating_sub(last_n);
    let mut lines = vec!["### Conversation (most recent first)".to_string()];

    for message in messages[start..].iter().rev() {
        let content = message.content.trim();
        if content.is_empty() {
            continue;
        }
        let label = match message.role {
            ChatRole::User => "User",
            ChatRole::Assistant => "Assistant",
        };
        lines.push(format!("- **{label}:** {content}"));
    }

    lines.join("\n")
}

/// Render the most recent `last_n` messages as plain `role: content` lines, oldest first.
pub fn build_transcript(messages: &[ChatMessage], last_n: usize) -> String {
    let start = messages.len().saturating_sub(last_n);
    messages[start..]
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Embed rendered history ahead of the current question.
pub fn build_question_with_history(history: &str, question: &str) -> String {
    format!("Conversation so far:\n{history}\n\nCurrent user question: {question}")
}

/// Wrap a question under the user-request heading with output instructions.
pub fn build_user_prompt(question: &str) -> String {
    format!(
        "### User request\n\
         {}\n\n\
         ### Output format\n\
         Respond in GitHub-flavored Markdown, using the style rules. \
         If the user asks for product recommendations, include up to 3 options \
         with a short reason each.\n",
        question.trim()
    )
}

/// Full user payload for a product question: catalog context then the request.
pub fn build_product_answer_prompt(products: &[Product], question: &str) -> String {
    format!(
        "{}\n\n{}",
        build_products_context(products),
        build_user_prompt(question)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} description"),
            price: "9.99".to_string(),
            category: "gadgets".to_string(),
        }
    }

    #[test]
    fn empty_catalog_is_sentinel_only() {
        let context = build_products_context(&[]);
        assert_eq!(context, "Product catalog is empty.");
        assert!(!context.contains('|'));
    }

    #[test]
    fn catalog_renders_table() {
        let context = build_products_context(&[product("1", "Lamp"), product("2", "Desk")]);
        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines[0], "### Product catalog");
        assert_eq!(lines[1], "| ID | Name | Category | Price | Description |");
        assert_eq!(lines[2], "|---:|---|---|---:|---|");
        assert_eq!(lines[3], "| 1 | Lamp | gadgets | 9.99 | Lamp description |");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn pipes_are_escaped_and_cells_trimmed() {
        let mut p = product("7", "  Cable | USB-C  ");
        p.description = "fast | durable".to_string();
        let context = build_products_context(&[p]);
        assert!(context.contains("| 7 | Cable \\| USB-C | gadgets | 9.99 | fast \\| durable |"));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let context = build_products_context(&[product("", "Ghost"), product("3", "Chair")]);
        assert!(!context.contains("Ghost"));
        assert!(context.contains("| 3 | Chair |"));
    }

    #[test]
    fn only_malformed_entries_yield_sentinel() {
        let context = build_products_context(&[product("1", " "), product("", "x")]);
        assert_eq!(context, EMPTY_CATALOG);
    }

    #[test]
    fn catalog_is_capped_at_limit() {
        let products: Vec<Product> = (0..75)
            .map(|i| product(&i.to_string(), &format!("Item {i}")))
            .collect();
        let context = build_products_context(&products);
        // heading + header + alignment + 60 rows
        assert_eq!(context.lines().count(), 3 + PRODUCT_LIMIT);
        assert!(context.contains("| 59 | Item 59 |"));
        assert!(!context.contains("| 60 | Item 60 |"));
    }

    #[test]
    fn conversation_context_newest_first_and_trimmed() {
        let messages: Vec<ChatMessage> = (0..12)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("question {i}"))
                } else {
                    ChatMessage::assistant(format!("answer {i}"))
                }
            })
            .collect();

        let context = build_conversation_context(&messages, 10);
        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines[0], "### Conversation (most recent first)");
        assert_eq!(lines[1], "- **Assistant:** answer 11");
        assert_eq!(lines[10], "- **User:** question 2");
        assert_eq!(lines.len(), 11);
        assert!(!context.contains("question 0"));
    }

    #[test]
    fn conversation_context_skips_blank_entries() {
        let messages = vec![
            ChatMessage::user("hello"),
            ChatMessage::assistant("   "),
            ChatMessage::user("  any lamps?  "),
        ];
        let context = build_conversation_context(&messages, HISTORY_WINDOW);
        assert_eq!(
            context,
            "### Conversation (most recent first)\n- **User:** any lamps?\n- **User:** hello"
        );
    }

    #[test]
    fn transcript_is_oldest_first_with_role_prefix() {
        let messages = vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello!"),
            ChatMessage::user("lamps?"),
        ];
        assert_eq!(
            build_transcript(&messages, 2),
            "assistant: hello!\nuser: lamps?"
        );
    }

    #[test]
    fn question_with_history_layout() {
        let text = build_question_with_history("user: hi", "hi");
        assert_eq!(text, "Conversation so far:\nuser: hi\n\nCurrent user question: hi");
    }

    #[test]
    fn user_prompt_trims_question() {
        let prompt = build_user_prompt("  Which lamp is brightest?  \n");
        assert!(prompt.starts_with("### User request\nWhich lamp is brightest?\n\n### Output format\n"));
        assert!(prompt.contains("up to 3 options"));
    }

    #[test]
    fn product_answer_prompt_puts_catalog_first() {
        let prompt = build_product_answer_prompt(&[product("1", "Lamp")], "any lamps?");
        let catalog_at = prompt.find("### Product catalog").unwrap();
        let request_at = prompt.find("### User request").unwrap();
        assert!(catalog_at < request_at);
    }

    #[test]
    fn system_prompt_carries_style_contract() {
        let system = support_agent_system_prompt();
        assert!(system.contains("Do not invent facts"));
        assert!(system.contains("'### Next steps'"));
        assert!(system.contains("tables when comparing"));
    }
}
