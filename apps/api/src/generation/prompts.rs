//! Prompt templates for the three generation tasks.
//!
//! Pure string formatting: every validated input value appears verbatim in the
//! produced prompt, together with explicit formatting instructions so the model
//! output needs no post-processing beyond trimming.

pub fn title_prompt(field_of_study: &str, keyword: &str, method: &str) -> String {
    format!(
        "Generate a professional thesis title for the following:\n\
         Field of Study: {field_of_study}\n\
         Keyword: {keyword}\n\
         Research Method: {method}\n\
         \n\
         Provide only the title, without any additional text."
    )
}

pub fn outline_prompt(title: &str, field_of_study: &str) -> String {
    format!(
        "Create a detailed thesis outline for:\n\
         Title: {title}\n\
         Field of Study: {field_of_study}\n\
         \n\
         Format the outline with numbered sections and subsections."
    )
}

pub fn method_prompt(keywords: &[String]) -> String {
    format!(
        "Based on these research keywords: {}\n\
         Recommend the most appropriate research method. Consider qualitative, \
         quantitative, mixed methods, etc.\n\
         Provide a brief explanation of why this method is suitable.",
        keywords.join(", ")
    )
}
