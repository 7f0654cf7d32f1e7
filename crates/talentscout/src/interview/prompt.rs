//! Instruction text sent to the model.
//!
//! [`system_prompt`] is rebuilt on every turn from the stage the candidate is
//! answering, so the assistant's next message is always written under the
//! current stage's instruction. [`tech_questions_prompt`] drives the one-off
//! question generation once the tech stack is known.

use super::stage::Stage;

/// System message for technical question generation.
pub const TECH_INTERVIEWER_PERSONA: &str =
    "You are a technical interviewer with expertise in various technologies.";

const PREAMBLE: &str = "\
You are an AI hiring assistant for TalentScout, a technology recruitment agency.
Your role is to professionally and courteously interview candidates while gathering essential information.
Maintain a friendly yet professional tone. Ask one question at a time.";

/// What the assistant should do while the interview is at `stage`.
pub fn stage_instruction(stage: Stage) -> &'static str {
    match stage {
        Stage::Greeting => {
            "Greet the candidate warmly and introduce yourself as TalentScout's AI hiring assistant."
        }
        Stage::Name => "Ask for the candidate's full name politely.",
        Stage::Email => "Request the candidate's email address and ensure it's in a valid format.",
        Stage::Phone => "Ask for the candidate's phone number in a professional manner.",
        Stage::Experience => "Inquire about the candidate's years of professional experience.",
        Stage::Position => "Ask about the desired position they're interested in.",
        Stage::Location => "Ask about their current location.",
        Stage::TechStack => {
            "Request their technical skills and experience, asking them to list their tech stack."
        }
        Stage::Questions => {
            "Generate relevant technical questions based on their tech stack. \
             Be thorough but not overwhelming."
        }
        Stage::Farewell => "",
    }
}

/// Persona preamble plus the instruction for `stage`.
pub fn system_prompt(stage: Stage) -> String {
    format!(
        "{PREAMBLE}\nCurrent conversation stage: {stage}\n\n{}",
        stage_instruction(stage)
    )
}

/// Request for 3-5 questions per technology in `tech_stack`.
pub fn tech_questions_prompt(tech_stack: &[String]) -> String {
    let techs = tech_stack.join(", ");
    format!(
        "\
Generate 3-5 technical interview questions for each of the following technologies: {techs}

Requirements:
1. Questions should assess both theoretical knowledge and practical experience
2. Include a mix of basic and advanced concepts
3. Focus on real-world applications and problem-solving
4. Avoid overly generic questions
5. Format the response clearly with technology names as headers

Current tech stack: {techs}"
    )
}
