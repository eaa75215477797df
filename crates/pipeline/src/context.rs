//! Instruction assembly for a generation request.

use scribe_db::models::asset::Asset;

/// Separator placed between asset contents in the shared context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Concatenate asset contents in the order given.
///
/// Assets without extracted text contribute an empty segment, so the
/// separator count always equals `assets.len() - 1`.
pub fn shared_context(assets: &[Asset]) -> String {
    assets
        .iter()
        .map(|a| a.content.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// System instruction: the shared context plus the task.
pub fn system_instruction(context: &str, prompt: &str) -> String {
    format!(
        "You are a content writer. Use the following source material to complete the task.\n\n\
         Source material:\n{context}\n\n\
         Task:\n{prompt}"
    )
}

/// User instruction: restates the task against the context.
pub fn user_instruction(context: &str, prompt: &str) -> String {
    format!("{prompt}\n\nBased on this content:\n{context}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(content: Option<&str>) -> Asset {
        Asset {
            id: uuid::Uuid::new_v4(),
            project_id: uuid::Uuid::nil(),
            title: "a".into(),
            file_name: "a.txt".into(),
            file_url: "https://blob.example/a.txt".into(),
            file_type: "text".into(),
            mime_type: "text/plain".into(),
            size: 1,
            content: content.map(str::to_string),
            token_count: 0,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn now() -> scribe_core::types::Timestamp {
        std::time::SystemTime::now().into()
    }

    #[test]
    fn contents_are_joined_in_order() {
        let ctx = shared_context(&[asset(Some("first")), asset(Some("second"))]);
        assert_eq!(ctx, "first\n\nsecond");
    }

    #[test]
    fn empty_contents_keep_their_slot() {
        let ctx = shared_context(&[asset(Some("a")), asset(None), asset(Some("b"))]);
        assert_eq!(ctx, "a\n\n\n\nb");
    }

    #[test]
    fn no_assets_gives_empty_context() {
        assert_eq!(shared_context(&[]), "");
    }

    #[test]
    fn instructions_carry_prompt_and_context() {
        let system = system_instruction("CTX", "Write a tweet");
        assert!(system.contains("CTX"));
        assert!(system.contains("Write a tweet"));

        let user = user_instruction("CTX", "Write a tweet");
        assert!(user.starts_with("Write a tweet"));
        assert!(user.ends_with("CTX"));
    }
}
