use crate::model::generation_request::GenerationRequest;

/// Builds the full prompt sent to the LLM.
/// Only formats text: no escaping, player input is passed through as-is.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(request: &GenerationRequest, context: &[String]) -> String {
        let mut prompt = String::new();

        push_narrator_role(&mut prompt, &request.template.description());
        push_maturity(&mut prompt, request.maturity.policy_text);
        push_context(&mut prompt, context);
        push_mode(&mut prompt, request.mode.label());
        push_history(&mut prompt, &request.history);
        push_player_input(&mut prompt, &request.input);

        prompt
    }
}

fn push_narrator_role(prompt: &mut String, template: &str) {
    prompt.push_str(
        "You are a Narrative Nexus Master creating an interactive adventure story based on the selected template: ",
    );
    prompt.push_str(template);
    prompt.push_str(
        ".\nKeep responses engaging, descriptive, and in second person (e.g., \"You see a dragon...\").\n\
Respond to the player's actions and continue the story logically.\n",
    );
}

fn push_maturity(prompt: &mut String, policy: &str) {
    prompt.push_str("Adhere to the maturity level: ");
    prompt.push_str(policy);
    prompt.push('\n');
}

fn push_context(prompt: &mut String, context: &[String]) {
    prompt.push_str("Use the following context from lore to enhance the story where relevant:\n\n");
    prompt.push_str("Context: ");
    prompt.push_str(&context.join("\n\n"));
    prompt.push_str("\n\n");
}

fn push_mode(prompt: &mut String, mode: &str) {
    prompt.push_str("Mode: ");
    prompt.push_str(mode);
    prompt.push_str(
        " (e.g., 'Story' for narration, 'Edit' for revisions, 'Continue' to advance, 'Do' for actions)\n\n",
    );
}

fn push_history(prompt: &mut String, history: &str) {
    prompt.push_str("Story so far: ");
    prompt.push_str(history);
    prompt.push_str("\n\n");
}

fn push_player_input(prompt: &mut String, input: &str) {
    prompt.push_str("Player's input: ");
    prompt.push_str(input);
    prompt.push_str("\n\nYour response:\n");
}
