use crate::api::TextGeneration;
use crate::error::Result;
use tracing::info;

/// Minimum number of scenes a breakdown may contain.
pub const MIN_SCENES: usize = 20;
/// Maximum number of scenes a breakdown may contain.
pub const MAX_SCENES: usize = 60;

const SCENE_PROMPT: &str = "You are a creative storyboard artist. Break the following story into clear, \
visual scene descriptions. Provide between 20 and 60 concise scene prompts, \
each on its own line and in chronological order. Avoid numbering each line; \
just write the scene descriptions.";

/// Normalize scene text by removing enumeration markers and trimming whitespace.
fn clean_scene_line(line: &str) -> &str {
    line.trim_start_matches(|c: char| {
        c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '*' | ':' | '.')
    })
    .trim()
}

/// Parse raw model output into an ordered list of scene descriptions.
///
/// Blank lines are dropped; duplicates are kept.
pub fn parse_scenes(raw: &str) -> Vec<String> {
    raw.lines()
        .map(clean_scene_line)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Break a story into an ordered list of scene descriptions.
///
/// The returned list always has between [`MIN_SCENES`] and [`MAX_SCENES`]
/// entries: under-length model output is padded with synthetic placeholders,
/// over-length output is truncated.
pub async fn break_story_into_scenes(
    story: &str,
    client: &impl TextGeneration,
) -> Result<Vec<String>> {
    let content = client.generate_text(SCENE_PROMPT, story).await?;

    let mut scenes = parse_scenes(&content);

    if scenes.len() < MIN_SCENES {
        let missing = MIN_SCENES - scenes.len();
        scenes.extend((1..=missing).map(|i| format!("Additional scene {}", i)));
    } else if scenes.len() > MAX_SCENES {
        scenes.truncate(MAX_SCENES);
    }

    info!("Broke story into {} scenes", scenes.len());
    Ok(scenes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use async_trait::async_trait;

    struct FixedCompletion(String);

    #[async_trait]
    impl TextGeneration for FixedCompletion {
        async fn generate_text(&self, _instruction: &str, _story: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl TextGeneration for FailingCompletion {
        async fn generate_text(&self, _instruction: &str, _story: &str) -> Result<String> {
            Err(FrameError::ApiError("backend down".to_string()))
        }
    }

    #[tokio::test]
    async fn numbered_lines_are_cleaned_and_padded() {
        let client = FixedCompletion(
            "1. First scene description\n2. Second scene description\n3. Third scene description"
                .to_string(),
        );

        let scenes = break_story_into_scenes("test story", &client).await.unwrap();

        assert_eq!(
            &scenes[..3],
            [
                "First scene description",
                "Second scene description",
                "Third scene description",
            ]
        );
        assert_eq!(scenes.len(), MIN_SCENES);
        assert_eq!(scenes[3], "Additional scene 1");
        assert_eq!(scenes[19], "Additional scene 17");
    }

    #[tokio::test]
    async fn in_range_output_passes_through_unchanged() {
        let lines: Vec<String> = (0..30).map(|i| format!("A hero crosses bridge {}", i)).collect();
        let client = FixedCompletion(lines.join("\n"));

        let scenes = break_story_into_scenes("story", &client).await.unwrap();

        assert_eq!(scenes, lines);
    }

    #[tokio::test]
    async fn over_length_output_is_truncated_to_maximum() {
        let lines: Vec<String> = (0..75).map(|i| format!("Scene about event {}", i)).collect();
        let client = FixedCompletion(lines.join("\n"));

        let scenes = break_story_into_scenes("story", &client).await.unwrap();

        assert_eq!(scenes.len(), MAX_SCENES);
        assert_eq!(scenes, lines[..MAX_SCENES]);
    }

    #[tokio::test]
    async fn empty_completion_yields_all_placeholders() {
        let client = FixedCompletion(String::new());

        let scenes = break_story_into_scenes("story", &client).await.unwrap();

        assert_eq!(scenes.len(), MIN_SCENES);
        assert_eq!(scenes[0], "Additional scene 1");
        assert_eq!(scenes[19], "Additional scene 20");
    }

    #[tokio::test]
    async fn duplicate_lines_are_kept() {
        let client = FixedCompletion("The same shot\nThe same shot\nThe same shot".to_string());

        let scenes = break_story_into_scenes("story", &client).await.unwrap();

        assert_eq!(&scenes[..3], ["The same shot", "The same shot", "The same shot"]);
    }

    #[tokio::test]
    async fn capability_errors_propagate() {
        let result = break_story_into_scenes("story", &FailingCompletion).await;

        assert!(matches!(result, Err(FrameError::ApiError(_))));
    }

    #[test]
    fn cleaning_strips_bullets_and_numbering() {
        assert_eq!(clean_scene_line("1. A dawn skyline"), "A dawn skyline");
        assert_eq!(clean_scene_line("- A dawn skyline"), "A dawn skyline");
        assert_eq!(clean_scene_line("  * 12: A dawn skyline  "), "A dawn skyline");
    }

    #[test]
    fn cleaning_is_idempotent_on_clean_lines() {
        let line = "A dawn skyline over the harbor";
        assert_eq!(clean_scene_line(line), line);
        assert_eq!(clean_scene_line(clean_scene_line(line)), line);
    }

    #[test]
    fn blank_and_marker_only_lines_are_dropped() {
        let scenes = parse_scenes("First beat\n\n   \n---\nSecond beat\n");
        assert_eq!(scenes, ["First beat", "Second beat"]);
    }
}
