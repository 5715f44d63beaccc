//! Fixed instruction blocks sent alongside user prompts.
//!
//! None of this text is user-controlled; the user only supplies the request
//! and the selected target that get spliced into the templates.

pub const DESIGN_GUIDELINES: [&str; 5] = [
    "Maintain Glassmorphism: Blur 10px-20px, 1px border white/10.",
    "Neon Accents: Primary #3399ff, Secondary #a855f7.",
    "Typography: JetBrains Mono for data, Inter for UI.",
    "Motion: Use subtle float (6s) or slide-in transitions.",
    "Brand: Agentic, high-tech, precise, and decentralized.",
];

pub const DESIGN_SYSTEM_INSTRUCTION: &str = r#"You are the TwistedStacks Design Agent.
Your persona is elite, precise, and forward-thinking.
Refer to users as "Lead Developer".
Always structure your response with:
1. Architectural Assessment
2. Recommended Mutation (Code)
3. Behavioral Guardrails check."#;

const MUTATION_PROMPT: &str = r#"Redesign Task for Component: "{target}".
Request: "{request}"
Context: TwistedStacks Brand (Agentic Dev Team).
Rules:
1. Stick to the neon-blue/dark-glass theme.
2. Provide specific Tailwind classes.
3. Explain the UX improvement."#;

const ASSET_PROMPT: &str = "TwistedStacks high-tech UI asset: {request}. Aesthetic: Unreal Engine 5 render, holographic, blueprint style, neon blue glow, black matte background.";

/// Shown in place of a target when nothing is selected.
pub const NO_TARGET: &str = "unselected";

/// Agent entry used when the endpoint answers without any text.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Simulation incomplete.";

/// Agent entry used when the text call fails for any reason.
pub const FAILURE_MESSAGE: &str = "Error in context orchestration. Check API link.";

pub fn mutation_prompt(target: Option<&str>, request: &str) -> String {
    MUTATION_PROMPT
        .replace("{target}", target.unwrap_or(NO_TARGET))
        .replace("{request}", request)
}

pub fn asset_prompt(request: &str) -> String {
    ASSET_PROMPT.replace("{request}", request)
}
