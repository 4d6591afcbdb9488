/*!
 * AI-backed content generation.
 *
 * - `script`: narration script generation from a user prompt
 * - `animation`: Manim code generation keyed to the narration timing
 * - `prompts`: the prompt templates both generators feed to the LLM
 */

pub mod animation;
pub mod prompts;
pub mod script;

pub use animation::AnimationCodeGenerator;
pub use script::ScriptGenerator;
