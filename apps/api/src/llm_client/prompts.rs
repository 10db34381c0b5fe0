// Shared prompt fragments.
// Each feature that calls the chat backend defines its own prompts alongside it;
// this file holds the cross-cutting pieces.

/// System prompt fragment that asks for bare JSON. Models do not always comply,
/// which is why JSON-mode replies still go through the extractor.
pub const JSON_ONLY_SYSTEM: &str = "Reply with ONLY valid minified JSON. \
    No prose, no markdown, no code fences.";

/// Restricts prose replies to the markdown subset the display formatter renders.
pub const MARKDOWN_SUBSET_INSTRUCTION: &str = "\
    Format your answer with at most three heading levels (#, ##, ###), \
    bullet lists, numbered lists, **bold** and *italic* text. \
    Do not use tables, images or HTML.";
