//! Prompt builder: persona preamble, packed context, worked examples, question cue.

use crate::pack::ContextSection;

/// Worked question/answer pairs shown to the model after the context.
///
/// They set tone and length only; none of them depends on the indexed book.
pub const EXAMPLE_QA: [(&str, &str); 10] = [
    (
        "What is the book about?",
        "It collects the author's observations on work, money and judgment, and how small choices compound over a lifetime.",
    ),
    (
        "Who should read this book?",
        "Anyone making decisions about their career or money who wants principles rather than tactics.",
    ),
    (
        "How should I think about luck?",
        "Treat it as something you can improve your exposure to. Put yourself where good outcomes are possible and stay there long enough for them to happen.",
    ),
    (
        "What matters more, effort or direction?",
        "Direction. Hard work on the wrong problem compounds in the wrong way, so choose carefully before you push.",
    ),
    (
        "How do I get better at making decisions?",
        "Read widely, write down why you decided something, and compare it with what actually happened.",
    ),
    (
        "Should I follow my passion?",
        "Follow your curiosity instead. Passion tends to come after you become good at something people value.",
    ),
    (
        "How important is reputation?",
        "Very. It takes years to build and one careless act to lose, so protect it in every small dealing.",
    ),
    (
        "What is the best investment I can make?",
        "Invest in your own skills and health. They pay off in every market.",
    ),
    (
        "How do I deal with failure?",
        "Accept it quickly, find what you can learn, and do not let a single loss push you out of the game.",
    ),
    (
        "What is the most common mistake people make?",
        "Optimizing for looking successful instead of being free. Status games have no finish line.",
    ),
];

/// Output of [`PromptTemplate::build`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltPrompt {
    /// Full text for the completion model.
    pub prompt: String,
    /// Concatenated section texts; stored with the answer.
    pub context: String,
}

/// Renders prompts for one book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    preamble: String,
}

impl PromptTemplate {
    /// Preamble naming `title` and `author`.
    pub fn for_book(title: &str, author: &str) -> Self {
        let preamble = format!(
            "{title} is a book by {author}. These are questions and answers by the author. \
             Please keep your answers to three sentences maximum, and speak in complete sentences. \
             Stop speaking once your point is made.\n\nContext that may be useful, pulled from {title}:\n"
        );
        Self { preamble }
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Concatenates preamble, sections, examples and the question cue.
    ///
    /// ```
    /// use contextor::prompt::PromptTemplate;
    ///
    /// let built = PromptTemplate::for_book("Walden", "H. D. Thoreau").build("Why the woods?", &[]);
    /// assert!(built.context.is_empty());
    /// assert!(built.prompt.ends_with("\n\n\nQ: Why the woods?\n\nA:"));
    /// ```
    pub fn build(&self, question: &str, sections: &[ContextSection]) -> BuiltPrompt {
        let context: String = sections.iter().map(|s| s.text.as_str()).collect();

        let mut prompt = String::with_capacity(self.preamble.len() + context.len() + 2048);
        prompt.push_str(&self.preamble);
        prompt.push_str(&context);
        for (q, a) in EXAMPLE_QA {
            prompt.push_str("\n\n\nQ: ");
            prompt.push_str(q);
            prompt.push_str("\n\nA: ");
            prompt.push_str(a);
        }
        prompt.push_str("\n\n\nQ: ");
        prompt.push_str(question);
        prompt.push_str("\n\nA:");

        BuiltPrompt { prompt, context }
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::for_book("The Book", "The author")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, text: &str) -> ContextSection {
        ContextSection {
            identifier: id.into(),
            text: text.into(),
            truncated: false,
        }
    }

    #[test]
    fn parts_appear_in_order() {
        let tpl = PromptTemplate::for_book("Title", "Someone");
        let sections = [section("Page 2", "\n* second"), section("Page 1", "\n* first")];
        let built = tpl.build("Is money important?", &sections);

        assert_eq!(built.context, "\n* second\n* first");
        assert!(built.prompt.starts_with(tpl.preamble()));
        assert!(tpl.preamble().contains("Title is a book by Someone"));

        let ctx_at = built.prompt.find(&built.context).unwrap();
        let first_example = built.prompt.find("\n\n\nQ: What is the book about?").unwrap();
        let cue = built.prompt.rfind("\n\n\nQ: Is money important?\n\nA:").unwrap();
        assert_eq!(ctx_at, tpl.preamble().len());
        assert!(ctx_at < first_example && first_example < cue);
        assert!(built.prompt.ends_with("\n\n\nQ: Is money important?\n\nA:"));
    }

    #[test]
    fn renders_all_ten_examples() {
        let built = PromptTemplate::default().build("Q?", &[]);
        // ten examples plus the cue
        assert_eq!(built.prompt.matches("\n\n\nQ: ").count(), 11);
        let (q, a) = EXAMPLE_QA[3];
        assert!(built.prompt.contains(&format!("\n\n\nQ: {q}\n\nA: {a}")));
    }

    #[test]
    fn building_is_deterministic() {
        let tpl = PromptTemplate::default();
        let sections = [section("Page 1", "\n* text")];
        assert_eq!(tpl.build("Why?", &sections), tpl.build("Why?", &sections));
    }

    #[test]
    fn empty_context_still_renders() {
        let tpl = PromptTemplate::default();
        let built = tpl.build("Why?", &[]);
        assert_eq!(built.context, "");
        assert!(built.prompt.starts_with(&format!("{}\n\n\nQ: ", tpl.preamble())));
    }
}
