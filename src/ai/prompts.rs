//! Prompt templates
//!
//! System prompts per task plus builders for the user prompts. The analysis
//! and report prompts ask the model to finish with a fenced JSON block so
//! that structured values can be merged over the heuristic ones.

/// System prompt for each kind of request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPrompt {
    Analysis,
    Refactoring,
    Generation,
    Report,
    RequirementsAnalysis,
    ProductionCode,
}

impl SystemPrompt {
    pub fn text(&self) -> &'static str {
        match self {
            SystemPrompt::Analysis => {
                "You are a seasoned software architect and code reviewer. Analyze the provided \
                 code for simplicity, maintainability and performance, following industry best \
                 practices without over-engineering."
            }
            SystemPrompt::Refactoring => {
                "You are an expert in software architecture and refactoring. Provide a complete \
                 refactored version of the code that is simpler, more modular and faster while \
                 keeping its behavior. Explain the improvements you made."
            }
            SystemPrompt::Generation => {
                "You are an expert software developer. Generate production-ready code that is \
                 clean, efficient and modular, and that follows the conventions of its language."
            }
            SystemPrompt::Report => {
                "You are a senior code analyst. Write a thorough analysis report covering \
                 quality, architecture, performance, security and maintainability, with \
                 specific and actionable recommendations."
            }
            SystemPrompt::RequirementsAnalysis => {
                "You are an expert software architect and analyst. Identify the key technical \
                 needs, architectural challenges and security considerations of the requirements \
                 and give concise, actionable guidance for a production implementation."
            }
            SystemPrompt::ProductionCode => {
                "You are an expert software developer generating production-ready code. Include \
                 error handling with meaningful logging, input validation, secure handling of \
                 sensitive data, tests for core paths and edge cases, and brief docstrings. \
                 Prefer simplicity over elaborate abstractions."
            }
        }
    }
}

const STRUCTURED_TAIL: &str = "\n\nFinish your answer with a ```json block containing an object \
with these keys when you can estimate them: complexity, linesOfCode, functionCount, classCount, \
overallScore (0-100), designPatterns, antiPatterns, bestPractices, suggestions (lists of short \
strings).";

/// Code review prompt
pub fn analysis_prompt(code: &str, language: &str) -> String {
    format!(
        r#"Analyze this {language} code with a focus on simplicity, efficiency and best practices. Assess:
1. **Simplicity**: where complexity can be reduced without losing functionality.
2. **SOLID Principles**: practical, non-intrusive improvements.
3. **Modularity**: single responsibility and separation of concerns.
4. **Error Handling and Logging**: clear messages, no convoluted error structures.
5. **Performance**: loops, memory use and call overhead.
6. **Security**: input validation and unsafe patterns.
7. **Readability**: naming, formatting, self-documenting code.
8. **Testability**: how to make the code easier to test.

Code:

{code}{STRUCTURED_TAIL}"#
    )
}

/// Refactoring prompt, seeded with a summary of an earlier analysis
pub fn refactoring_prompt(code: &str, language: &str, analysis_summary: &str) -> String {
    format!(
        r#"Based on the following analysis results:

{analysis_summary}

Refactor this {language} code to:
1. Simplify complexity and remove needless abstractions.
2. Improve modularity with reusable components.
3. Use straightforward, meaningful error handling.
4. Fix performance bottlenecks.
5. Fix security issues and validate input.
6. Apply consistent naming and formatting.
7. Add unit tests for critical paths and edge cases.

Original code:

{code}"#
    )
}

/// Single-pass generation prompt for plain-text requirements
pub fn generation_prompt(requirements: &str) -> String {
    format!(
        r#"Read and interpret the following plain text requirements and generate code that meets them:

{requirements}

The generated code should:
1. Implement each step as a separate, focused function.
2. Read its inputs from configurable locations and formats.
3. Keep configuration parameters together at the top.
4. Handle errors for file operations, type checks and transformations.
5. Log progress at each step.
6. Be efficient on large inputs.
7. Document functions, their parameters and outputs.

Generate clean, production-ready code that aligns with these requirements."#
    )
}

/// Full analysis report prompt
pub fn report_prompt(code: &str, language: &str) -> String {
    format!(
        r#"Generate a comprehensive analysis report for this {language} code:

{code}

The report should include:
1. **Overall Code Quality**
2. **Architecture and Structure**
3. **Performance Analysis**
4. **Security Review**
5. **Maintainability and Consistency**
6. **Test Coverage and Testability**
7. **Technical Debt**
8. **Actionable Recommendations**{STRUCTURED_TAIL}"#
    )
}

/// First stage of the requirements pipeline
pub fn requirements_analysis_prompt(requirements: &str) -> String {
    format!(
        r#"Analyze these software requirements as a lead engineer. Cover:

1. Key features for the core functionality.
2. Technical and architectural requirements.
3. A recommended modular design.
4. Potential challenges and how to mitigate them.
5. Security and scalability considerations.
6. Maintainability and future extensibility.
7. Testing needs.
8. Dependencies and integration points.
9. Performance optimization strategies.

Requirements:

{requirements}

Finish with a short roadmap for implementation and testing."#
    )
}

/// Second stage of the requirements pipeline
pub fn code_generation_prompt(language: &str, requirements: &str, analysis: &str) -> String {
    format!(
        r#"Using the following requirements and analysis, generate {language} code that is production-ready and follows best practices:

Requirements:
{requirements}

Analysis:
{analysis}

Ensure the generated code includes:
1. A complete, modular implementation
2. Error handling with clear messages
3. Input validation
4. Security measures for data handling
5. Brief docstrings
6. Tests covering core functionality and edge cases

Return the code in a markdown code block."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_inputs() {
        let p = analysis_prompt("let x = 1;", "javascript");
        assert!(p.contains("javascript code"));
        assert!(p.contains("let x = 1;"));
        assert!(p.contains("```json"));

        let p = code_generation_prompt("python", "REQ", "ANALYSIS");
        assert!(p.contains("generate python code"));
        assert!(p.contains("REQ"));
        assert!(p.contains("ANALYSIS"));
    }

    #[test]
    fn test_every_system_prompt_is_non_empty() {
        for prompt in [
            SystemPrompt::Analysis,
            SystemPrompt::Refactoring,
            SystemPrompt::Generation,
            SystemPrompt::Report,
            SystemPrompt::RequirementsAnalysis,
            SystemPrompt::ProductionCode,
        ] {
            assert!(!prompt.text().is_empty());
        }
    }
}
