//! Prompt templates: one answer prompt per `AnswerType`, plus the rerank,
//! rephrase, comparative and basic prompts.
//!
//! Every answer prompt is `instruction --- schema --- example`, followed by the
//! context and question block.

use quarry_core::models::AnswerType;

const DELIMITER: &str = "\n\n---\n\n";

const SHARED_INSTRUCTION: &str = "\
You are a retrieval-augmented question answering system.
Answer the question using only the retrieved context below.

Think step by step before giving the final answer, paying close attention to the exact wording of the question.
- The answer may be phrased differently from the question.
- Apply the domain knowledge the document type calls for.";

const RELEVANT_PAGES_RULE: &str = "\
relevant_pages lists only the page numbers that directly state the answer or strongly support it. \
Do not include pages that are only loosely related. Include at least one page.";

/// One answer prompt variant.
struct AnswerTemplate {
    final_answer_rule: &'static str,
    final_answer_type: &'static str,
    example: &'static str,
}

const NAME_TEMPLATE: AnswerTemplate = AnswerTemplate {
    final_answer_type: "string | \"N/A\"",
    final_answer_rule: "\
A company name must match the question exactly. A person's name must be the full name. \
A product name must match the context exactly. No extra words or commentary. \
Return \"N/A\" when the context has no relevant information.",
    example: r#"Example:
Question:
"Who is the CEO of 'Southern Airlines Co., Ltd.'?"

Answer:
```
{
  "step_by_step_analysis": "1. The question asks for the CEO of 'Southern Airlines Co., Ltd.'. The CEO is the top executive, sometimes titled president or managing director.\n2. The source is the company's annual report.\n3. The report states that Zhang San is president and chief executive officer.\n4. Therefore the CEO is Zhang San.",
  "reasoning_summary": "The annual report names Zhang San as president and CEO.",
  "relevant_pages": [58],
  "final_answer": "Zhang San"
}
```"#,
};

const NUMBER_TEMPLATE: AnswerTemplate = AnswerTemplate {
    final_answer_type: "number | \"N/A\"",
    final_answer_rule: "\
Match the metric definition exactly: a context figure is only acceptable when it measures precisely \
what the question asks. Respect units, currencies and reporting periods. Return the figure as a bare \
number without thousands separators or units. Return \"N/A\" when the figure would need to be \
derived, estimated, or is not present.",
    example: r#"Example:
Question:
"What was the total assets of 'Acme Holdings' in 2022?"

Answer:
```
{
  "step_by_step_analysis": "1. The question asks for total assets at the end of 2022.\n2. The consolidated balance sheet reports total assets.\n3. The figure for 31 December 2022 is 6,601,086,000 yuan.\n4. The unit and period match the question.\n5. The answer is 6601086000.",
  "reasoning_summary": "The 2022 consolidated balance sheet states total assets directly.",
  "relevant_pages": [41],
  "final_answer": 6601086000
}
```"#,
};

const BOOLEAN_TEMPLATE: AnswerTemplate = AnswerTemplate {
    final_answer_type: "boolean",
    final_answer_rule: "\
A boolean taken from the context that directly answers the question. If the question asks whether \
something happened and the context covers the topic but it did not happen, return false.",
    example: r#"Example:
Question:
"Did the annual report of 'Vanke Co., Ltd.' announce a change in dividend policy?"

Answer:
```
{
  "step_by_step_analysis": "1. The question asks about a change in dividend policy.\n2. Pages 12 and 18 mention a higher dividend amount under the existing policy.\n3. Page 45 gives the dividend details.\n4. The increase follows the established policy.\n5. The question asks about policy, not amount.",
  "reasoning_summary": "The dividend amount changed but the policy did not.",
  "relevant_pages": [12, 18, 45],
  "final_answer": false
}
```"#,
};

const NAMES_TEMPLATE: AnswerTemplate = AnswerTemplate {
    final_answer_type: "list of strings | \"N/A\"",
    final_answer_rule: "\
Each entry must match the context exactly. For positions return only the titles, once each. For \
people return full names only. For new products return only product names from the context. \
Return \"N/A\" when there is no information.",
    example: r#"Example:
Question:
"Which executives were newly appointed?"

Answer:
```
{
  "step_by_step_analysis": "1. The question asks for newly appointed executives.\n2. Page 89 lists new executive agreements.\n3. Section 10.9 names Zhang San as general counsel and section 10.10 names Li Si as COO.\n4. Both are new appointments.",
  "reasoning_summary": "Sections 10.9 and 10.10 list Zhang San and Li Si as new executives.",
  "relevant_pages": [89],
  "final_answer": ["Zhang San", "Li Si"]
}
```"#,
};

const STRING_TEMPLATE: AnswerTemplate = AnswerTemplate {
    final_answer_type: "string | \"N/A\"",
    final_answer_rule: "\
A concise answer grounded in the context. Quote figures and names exactly. \
Return \"N/A\" when the context does not answer the question.",
    example: r#"Example:
Question:
"What is the company's main business?"

Answer:
```
{
  "step_by_step_analysis": "1. The question asks for the main business.\n2. The company overview on page 5 describes its operations.\n3. It states the company develops and sells residential property.\n4. No other segment is described as primary.\n5. The main business is residential property development.",
  "reasoning_summary": "The company overview describes residential property development as the core business.",
  "relevant_pages": [5],
  "final_answer": "Residential property development and sales"
}
```"#,
};

fn answer_template(answer_type: AnswerType) -> &'static AnswerTemplate {
    match answer_type {
        AnswerType::Name => &NAME_TEMPLATE,
        AnswerType::Number => &NUMBER_TEMPLATE,
        AnswerType::Boolean => &BOOLEAN_TEMPLATE,
        AnswerType::Names => &NAMES_TEMPLATE,
        AnswerType::String => &STRING_TEMPLATE,
    }
}

fn schema_block(final_answer_type: &str, final_answer_rule: &str) -> String {
    format!(
        "Your reply must be a single JSON object with exactly these keys, in this order:\n\
         ```\n\
         {{\n  \
           \"step_by_step_analysis\": string,  // at least five reasoning steps\n  \
           \"reasoning_summary\": string,      // about fifty words\n  \
           \"relevant_pages\": [integer],\n  \
           \"final_answer\": {final_answer_type}\n\
         }}\n\
         ```\n\
         {RELEVANT_PAGES_RULE}\n\
         final_answer: {final_answer_rule}"
    )
}

fn context_block(context: &str, question: &str) -> String {
    format!("Context:\n\"\"\"\n{context}\n\"\"\"{DELIMITER}Question:\n\"{question}\"\n")
}

/// Build the answer prompt for a classified question.
pub fn answer_prompt(answer_type: AnswerType, context: &str, question: &str) -> String {
    let template = answer_template(answer_type);
    [
        SHARED_INSTRUCTION.to_string(),
        schema_block(template.final_answer_type, template.final_answer_rule),
        template.example.to_string(),
        context_block(context, question),
    ]
    .join(DELIMITER)
}

const RERANK_INSTRUCTION: &str = "\
You are an expert at reranking retrieval results.
You will receive a query and several retrieved text blocks. Score each block's relevance to the query.

Instructions:
1. Reasoning: analyze how each block relates to the query and explain briefly.
2. Relevance score from 0 to 1 in steps of 0.1:
   0 = completely irrelevant
   0.3 = slightly relevant
   0.5 = moderately relevant
   0.7 = relevant
   0.9 = highly relevant
   1 = perfect match
3. Judge only the content; make no assumptions.

Reply with a JSON object:
{\"block_rankings\": [{\"reasoning\": string, \"relevance_score\": number}]}
with one entry per block, in block order.";

/// Build the LLM-judge prompt scoring `blocks` against `query`.
pub fn rerank_prompt(query: &str, blocks: &[&str]) -> String {
    let formatted = blocks
        .iter()
        .enumerate()
        .map(|(i, text)| format!("Block {}:\n\n\"\"\"{}\"\"\"", i + 1, text))
        .collect::<Vec<_>>()
        .join(DELIMITER);

    format!(
        "{RERANK_INSTRUCTION}{DELIMITER}Here is the query: \"{query}\"\n\n\
         Here are the retrieved text blocks:\n{formatted}\n\n\
         You should provide exactly {} rankings, in order.",
        blocks.len()
    )
}

const REPHRASE_INSTRUCTION: &str = "\
You are a question rewriting system.
Split a comparative question into one standalone question per company.
Each output question must keep the original meaning and metric, target its company, and use consistent wording.

Reply with a JSON object:
{\"questions\": [{\"company_name\": string, \"question\": string}]}
company_name must match the quoted name in the original question exactly.";

const REPHRASE_EXAMPLE: &str = r#"Example:
Input:
Original comparative question: 'Which company had higher revenue in 2022, "Apple" or "Microsoft"?'
Companies: "Apple", "Microsoft"

Output:
{
  "questions": [
    {"company_name": "Apple", "question": "What was Apple's revenue in 2022?"},
    {"company_name": "Microsoft", "question": "What was Microsoft's revenue in 2022?"}
  ]
}"#;

/// Build the prompt that splits a comparative question per company.
pub fn rephrase_prompt(question: &str, companies: &[&str]) -> String {
    let companies = companies
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{REPHRASE_INSTRUCTION}{DELIMITER}{REPHRASE_EXAMPLE}{DELIMITER}\
         Original comparative question: '{question}'\n\nCompanies: {companies}"
    )
}

const COMPARATIVE_INSTRUCTION: &str = "\
You are a question answering system.
Answer the original comparative question using only the individual per-company answers below.
Reason step by step.

Comparison rules:
- When the question asks to pick a company, the answer must match the company name in the question exactly.
- Exclude companies whose figures are in a different currency.
- If every company is excluded, return \"N/A\".
- If only one company remains, return its name.";

/// Build the prompt that merges per-company answers into one.
pub fn comparative_prompt(answers: &str, question: &str) -> String {
    [
        COMPARATIVE_INSTRUCTION.to_string(),
        schema_block(
            "string | \"N/A\"",
            "A single company name exactly as written in the question, or \"N/A\". Keep relevant_pages empty.",
        ),
        format!(
            "Individual company answers:\n\"\"\"\n{answers}\n\"\"\"{DELIMITER}\
             Original comparative question:\n\"{question}\"\n"
        ),
    ]
    .join(DELIMITER)
}
