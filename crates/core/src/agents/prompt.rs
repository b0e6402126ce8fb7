//! Prompt composition.
//!
//! The system prompt, user text and optional image are combined with a
//! fixed template:
//!
//! ```text
//! {system prompt}
//!
//! User: {user text}
//! [User sent an image]
//! Agent:
//! ```
//!
//! The image line is present only when an image is attached; the image
//! itself travels next to the text as a media part.

use crate::agents::base::GenerationRequest;
use crate::media::ImageDataUri;

/// Compose the request for one turn. Pure; performs no I/O.
pub fn build_request(
    system_prompt: &str,
    user_text: &str,
    image: Option<&ImageDataUri>,
) -> GenerationRequest {
    GenerationRequest {
        system_prompt: system_prompt.to_string(),
        user_text: user_text.to_string(),
        prompt: render_prompt(system_prompt, user_text, image.is_some()),
        image: image.cloned(),
    }
}

fn render_prompt(system_prompt: &str, user_text: &str, has_image: bool) -> String {
    let mut prompt = format!("{system_prompt}\n\nUser: {user_text}\n");
    if has_image {
        prompt.push_str("[User sent an image]\n");
    }
    prompt.push_str("Agent:");
    prompt
}
