//! Answer-type classification by keyword matching.
//!
//! Sets are checked in a fixed order and the first set with any hit wins:
//! number, name, boolean, names, then the `string` default. Matching is a
//! case-insensitive substring test, so plurals and contractions match their
//! stem. English keywords that are common word fragments carry a space
//! ("rate" sits inside "corporate" and "strategy").

use quarry_core::models::AnswerType;

/// Keyword sets in precedence order.
const ANSWER_TYPE_KEYWORDS: &[(AnswerType, &[&str])] = &[
    (
        AnswerType::Number,
        &[
            "多少",
            "金额",
            "数值",
            "数量",
            "比例",
            "百分比",
            "率",
            "收入",
            "利润",
            "资产",
            "负债",
            "销售额",
            "成本",
            "费用",
            "投资",
            "市值",
            "股价",
            "收益",
            "产值",
            "产量",
            "销量",
            "how many",
            "how much",
            "amount",
            "number of",
            "percent",
            " ratio",
            " rate",
            "revenue",
            "profit",
            "assets",
            "liabilities",
            "sales",
            "cost",
            "expense",
            "investment",
            "market cap",
            "share price",
            "earnings",
            "income",
        ],
    ),
    (
        AnswerType::Name,
        &[
            "谁",
            "哪个",
            "哪位",
            "什么人",
            "姓名",
            "名字",
            "叫什么",
            "称谓",
            "职务",
            "职位",
            "角色",
            "who ",
            "whom",
            "whose",
            "which person",
            "name of",
            "job title",
            "position",
            " role",
        ],
    ),
    (
        AnswerType::Boolean,
        &[
            "是否",
            "有没有",
            "是否存在",
            "能否",
            "可否",
            "是不是",
            "是否具备",
            "是否拥有",
            "whether",
            "is there",
            "are there",
            "does",
            "did ",
            "didn't",
            "can it",
            "is it true",
        ],
    ),
    (
        AnswerType::Names,
        &[
            "哪些",
            "哪些人",
            "几个人",
            "都有谁",
            "都包括",
            "分别",
            "列表",
            "清单",
            "所有",
            "多个",
            "which",
            "list ",
            "all of",
            "names of",
            "enumerate",
        ],
    ),
];

/// Classify the answer shape a question expects.
pub fn classify(question: &str) -> AnswerType {
    let question = question.to_lowercase();

    ANSWER_TYPE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| question.contains(kw)))
        .map(|&(answer_type, _)| answer_type)
        .unwrap_or(AnswerType::String)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chinese_number_question() {
        assert_eq!(classify("公司2022年总资产是多少"), AnswerType::Number);
    }

    #[test]
    fn chinese_names_question() {
        assert_eq!(classify("哪些高管新上任"), AnswerType::Names);
    }

    #[test]
    fn number_outranks_name() {
        // "谁" (name) and "利润" (number) both match.
        assert_eq!(classify("谁的利润最高"), AnswerType::Number);
    }

    #[test]
    fn name_outranks_names() {
        // "都有谁" is a names keyword but contains the name keyword "谁".
        assert_eq!(classify("董事会都有谁"), AnswerType::Name);
    }

    #[test]
    fn boolean_question() {
        assert_eq!(classify("公司是否宣布了分红政策变更"), AnswerType::Boolean);
        assert_eq!(
            classify("Did the board approve a buyback?"),
            AnswerType::Boolean
        );
    }

    #[test]
    fn english_matching_is_case_insensitive() {
        assert_eq!(classify("WHO is the CEO?"), AnswerType::Name);
        assert_eq!(classify("How Much did it cost"), AnswerType::Number);
    }

    #[test]
    fn plurals_and_contractions_match_their_stem() {
        assert_eq!(
            classify("What were the company's profits in 2022?"),
            AnswerType::Number
        );
        assert_eq!(classify("What were total costs last year?"), AnswerType::Number);
        assert_eq!(
            classify("Doesn't the board hold veto rights?"),
            AnswerType::Boolean
        );
    }

    #[test]
    fn number_keyword_wins_over_later_boolean_hit() {
        // " rate" (number) and "did " (boolean) both match.
        assert_eq!(classify("What rates did the bank charge?"), AnswerType::Number);
    }

    #[test]
    fn fragment_keywords_do_not_fire_inside_longer_words() {
        assert_eq!(classify("Describe the corporate strategy"), AnswerType::String);
        assert_eq!(classify("Summarise the cooperation agreement"), AnswerType::String);
        assert_eq!(classify("What is the interest rate?"), AnswerType::Number);
    }

    #[test]
    fn unmatched_defaults_to_string() {
        assert_eq!(classify(""), AnswerType::String);
        assert_eq!(classify("描述公司的发展战略"), AnswerType::String);
    }
}
