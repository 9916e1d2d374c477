//! Prompt templates and output schemas for the three provider calls.

use crate::domain::TaskType;
use crate::llm::{Schema, StructuredRequest};

/// Task-generation request. Each variant owns its prompt template and the
/// fields the provider must return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRequest<'a> {
    Essay { topic: &'a str },
    LetterEmail { topic: &'a str },
    Proposal { topic: &'a str },
    Report { topic: &'a str },
    Review { topic: &'a str },
}

impl<'a> TaskRequest<'a> {
    pub fn new(task_type: TaskType, topic: &'a str) -> Self {
        match task_type {
            TaskType::Essay => Self::Essay { topic },
            TaskType::LetterEmail => Self::LetterEmail { topic },
            TaskType::Proposal => Self::Proposal { topic },
            TaskType::Report => Self::Report { topic },
            TaskType::Review => Self::Review { topic },
        }
    }

    pub fn task_type(&self) -> TaskType {
        match self {
            Self::Essay { .. } => TaskType::Essay,
            Self::LetterEmail { .. } => TaskType::LetterEmail,
            Self::Proposal { .. } => TaskType::Proposal,
            Self::Report { .. } => TaskType::Report,
            Self::Review { .. } => TaskType::Review,
        }
    }

    pub fn topic(&self) -> &'a str {
        match *self {
            Self::Essay { topic }
            | Self::LetterEmail { topic }
            | Self::Proposal { topic }
            | Self::Report { topic }
            | Self::Review { topic } => topic,
        }
    }

    pub fn prompt(&self) -> String {
        let topic = self.topic();
        match self {
            Self::Essay { .. } => format!(
                "Generate a Cambridge C1 Advanced (CAE) Writing Part 1 Essay task about: \"{topic}\".\n\n\
                 Structure:\n\
                 1. Context: Brief scene setting (e.g., \"Your class has listened to a panel discussion...\").\n\
                 2. Question: Practical policy/decision question (e.g., \"Which facility should get funding?\").\n\
                 3. Points: Exactly 3 noun phrases (e.g., \"cycle paths\").\n\
                 4. Opinions: Exactly 3 mixed opinions corresponding to points.\n\
                 5. Instructions: Standard C1 essay instruction.\n\n\
                 Keep it realistic (town planning, education, workplace). Avoid sci-fi."
            ),
            Self::LetterEmail { .. } => format!(
                "Generate a Cambridge C1 Advanced (CAE) Writing Part 2 Letter/Email task about: \"{topic}\".\n\n\
                 Structure:\n\
                 1. Context: A message or advertisement the candidate is replying to, naming the recipient.\n\
                 2. Question: What the candidate must write and to whom.\n\
                 3. Points: 2-3 things the reply must cover.\n\
                 4. Instructions: \"Write your letter.\" or \"Write your email.\"\n\n\
                 Make the expected register (formal or informal) clear from the context."
            ),
            Self::Proposal { .. } => format!(
                "Generate a Cambridge C1 Advanced (CAE) Writing Part 2 Proposal task about: \"{topic}\".\n\n\
                 Structure:\n\
                 1. Context: An organisation or committee inviting proposals, defining the reader.\n\
                 2. Question: The decision the proposal should support.\n\
                 3. Points: 2-3 specific content requirements, including a recommendation.\n\
                 4. Instructions: \"Write your proposal.\"\n\n\
                 Tone: Formal, persuasive."
            ),
            Self::Report { .. } => format!(
                "Generate a Cambridge C1 Advanced (CAE) Writing Part 2 Report task about: \"{topic}\".\n\n\
                 Structure:\n\
                 1. Context: Professional/academic situation defining role and reader.\n\
                 2. Question: Instruction on who to write to.\n\
                 3. Points: 2-3 specific content requirements.\n\
                 4. Instructions: \"Write your report.\"\n\n\
                 Tone: Formal."
            ),
            Self::Review { .. } => format!(
                "Generate a Cambridge C1 Advanced (CAE) Writing Part 2 Review task about: \"{topic}\".\n\n\
                 Structure:\n\
                 1. Context: A website, magazine or newsletter asking readers for reviews.\n\
                 2. Question: What is being reviewed and for whom.\n\
                 3. Points: 2-3 aspects the review must describe, evaluate or recommend.\n\
                 4. Instructions: \"Write your review.\"\n\n\
                 Tone: Engaging, evaluative."
            ),
        }
    }

    pub fn schema(&self) -> Schema {
        let base = Schema::object()
            .required_property("context", Schema::string())
            .required_property("question", Schema::string())
            .required_property("points", Schema::string_list())
            .required_property("instructions", Schema::string());
        match self {
            Self::Essay { .. } => base.required_property("opinions", Schema::string_list()),
            Self::LetterEmail { .. }
            | Self::Proposal { .. }
            | Self::Report { .. }
            | Self::Review { .. } => base,
        }
    }

    pub fn to_request(&self, temperature: f64) -> StructuredRequest {
        StructuredRequest {
            prompt: self.prompt(),
            schema: self.schema(),
            temperature,
        }
    }
}

pub fn improve_request(text: &str, task_context: &str, temperature: f64) -> StructuredRequest {
    let prompt = format!(
        "Act as a Cambridge English Editor. Rewrite this C1 Advanced student text to Band 5 standard.\n\n\
         Rules:\n\
         1. RETAIN arguments/intent.\n\
         2. Upgrade vocab/grammar to C1/C2 level.\n\
         3. Enhance cohesion.\n\
         4. FIX all errors.\n\n\
         Context: {task_context}\n\
         Student Text: \"{text}\"\n\n\
         In keyChanges list, in this order:\n\
         - specific GRAMMAR/SPELLING ERRORS fixed (Format: 'Correction: [original] -> [fixed]')\n\
         - specific VOCABULARY UPGRADES (Format: 'Upgrade: [original] -> [advanced]')\n\
         - structural improvements"
    );

    StructuredRequest {
        prompt,
        schema: Schema::object()
            .required_property("rewrittenText", Schema::string())
            .required_property("keyChanges", Schema::string_list()),
        temperature,
    }
}

fn feedback_detail_schema() -> Schema {
    Schema::object()
        .required_property("summary", Schema::string())
        .required_property("strengths", Schema::string_list())
        .required_property("weaknesses", Schema::string_list())
}

pub fn assess_request(text: &str, task_context: &str, temperature: f64) -> StructuredRequest {
    let prompt = format!(
        "Act as a senior Cambridge Examiner (CAE). Assess this text.\n\
         Task: {task_context}\n\
         Text: \"{text}\"\n\
         Rubric: Content, Communicative Achievement, Organisation, Language.\n\
         Give each subscale an integer band from 0 to 5, with a summary, strengths and weaknesses, \
         then a general summary."
    );

    let band = || Schema::integer_in(0, 5);
    let scores = Schema::object()
        .required_property("content", band())
        .required_property("communicative", band())
        .required_property("organisation", band())
        .required_property("language", band());
    let feedback = Schema::object()
        .required_property("content", feedback_detail_schema())
        .required_property("communicative", feedback_detail_schema())
        .required_property("organisation", feedback_detail_schema())
        .required_property("language", feedback_detail_schema())
        .required_property("general", Schema::string());

    StructuredRequest {
        prompt,
        schema: Schema::object()
            .required_property("scores", scores)
            .required_property("feedback", feedback),
        temperature,
    }
}
