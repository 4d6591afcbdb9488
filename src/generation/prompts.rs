use once_cell::sync::Lazy;
use regex::Regex;

use crate::timing::TimingModel;

// @module: Prompt templates for the LLM-backed generators

/// Markdown code fence with optional language tag wrapping the whole output
static CODE_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[a-zA-Z0-9_+-]*[ \t]*\r?\n(.*?)\r?\n?```\s*$").unwrap()
});

/// Prompt for generating the narration script from a user request
pub fn narration_script_prompt(user_prompt: &str) -> String {
    format!(
        "You are an expert educational content creator. The user has asked the \
         following question:\n\n\"{user_prompt}\"\n\n\
         Create a clear, concise audio script that explains this concept or \
         answers this question.\n\n\
         REQUIREMENTS:\n\
         - The script must be short enough to be spoken in about 15 seconds\n\
         - Write in a conversational tone suitable for audio narration\n\
         - Get straight to the point, no introductions or filler\n\
         - Use simple, clear language\n\
         - No stage directions or sound effects, just the spoken content\n\n\
         Return ONLY the script text, nothing else."
    )
}

/// Prompt for generating Manim code synchronized to the narration timing.
///
/// The word-level timing table is rendered into the prompt so the model can
/// key animation beats to when each word is actually spoken.
pub fn animation_code_prompt(
    user_prompt: &str,
    script: &str,
    timing: &TimingModel,
    scene_class: &str,
) -> String {
    let mut timing_table = String::new();
    for word in timing.words() {
        timing_table.push_str(&format!(
            "  {:.2}s - {:.2}s  {}\n",
            word.start, word.end, word.word
        ));
    }

    format!(
        "You are an expert at writing Manim Community Edition code. Generate a \
         Python animation for this request: {user_prompt}\n\n\
         The animation will play under this spoken narration:\n\
         \"{script}\"\n\n\
         The narration lasts {duration:.2} seconds. Each word is spoken at:\n\
         {timing_table}\n\
         REQUIREMENTS:\n\
         1. Define a class called {scene_class} that inherits from Scene\n\
         2. Put all animations inside its construct() method\n\
         3. Start the file with: from manim import *\n\
         4. Time the animations to the word timestamps above using run_time and \
         self.wait() so visuals appear as the matching words are spoken\n\
         5. The total animation length must match the narration length of \
         {duration:.2} seconds\n\
         6. Use only standard Manim mobjects (Text, MathTex, shapes, Axes, \
         VGroup) and animations (Create, Write, FadeIn, FadeOut, Transform)\n\
         7. Return ONLY valid Python code, no explanations or markdown",
        duration = timing.total_duration(),
    )
}

/// Strip a surrounding Markdown code fence from LLM output, if present
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if let Some(captures) = CODE_FENCE_REGEX.captures(trimmed) {
        if let Some(inner) = captures.get(1) {
            return inner.as_str().trim().to_string();
        }
    }

    // An opening fence without a closing one still gets stripped
    if trimmed.starts_with("```") {
        let mut lines = trimmed.lines();
        lines.next();
        return lines.collect::<Vec<&str>>().join("\n").trim().to_string();
    }

    trimmed.to_string()
}
