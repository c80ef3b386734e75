//! TREC-style evaluation: average precision, P@10 and NDCG over a run file
//! scored against relevance judgments.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::constants::EXPECTED_TOPICS;
use crate::errors::EngineError;

/// One relevance judgment: is `docno` relevant for a topic, and how much.
#[derive(Debug, Clone)]
struct Judgment {
    docno: String,
    relevant: i32,
}

/// Relevance judgments grouped by topic id.
type RelevancyProfiles = BTreeMap<String, Vec<Judgment>>;

/// One parsed line of a run file: topic, docno and score are all the
/// metrics below need; rank and the other columns are validated but unused.
#[derive(Debug, Clone)]
struct RunLine {
    topic: String,
    docno: String,
    score: f64,
}

fn parse_run_line(line: &str, line_no: usize) -> Result<RunLine, EngineError> {
    let cols: Vec<&str> = line.split(' ').collect();
    if cols.len() != 6 {
        return Err(EngineError::RunParseError {
            line_no,
            detail: format!("expected 6 columns, found {}", cols.len()),
        });
    }
    cols[3].parse::<f64>().map_err(|_| EngineError::RunParseError {
        line_no,
        detail: format!("`{}` is not a valid rank", cols[3]),
    })?;
    let score: f64 = cols[4].parse().map_err(|_| EngineError::RunParseError {
        line_no,
        detail: format!("`{}` is not a valid score", cols[4]),
    })?;
    Ok(RunLine {
        topic: cols[0].to_string(),
        docno: cols[2].to_string(),
        score,
    })
}

fn load_relevancy_profiles(path: &Path) -> Result<RelevancyProfiles, EngineError> {
    let mut profiles: RelevancyProfiles = BTreeMap::new();
    for (line_no, line) in fs::read_to_string(path)?.lines().enumerate() {
        let cols: Vec<&str> = line.split(' ').collect();
        if cols.len() < 4 {
            return Err(EngineError::RunParseError {
                line_no: line_no + 1,
                detail: format!("expected at least 4 columns, found {}", cols.len()),
            });
        }
        let relevant: i32 = cols[3].trim().parse().map_err(|_| EngineError::RunParseError {
            line_no: line_no + 1,
            detail: format!("`{}` is not a valid relevance judgment", cols[3]),
        })?;
        profiles.entry(cols[0].to_string()).or_default().push(Judgment {
            docno: cols[2].to_string(),
            relevant,
        });
    }
    Ok(profiles)
}

fn load_result_profiles(path: &Path) -> Result<Vec<RunLine>, EngineError> {
    fs::read_to_string(path)?
        .lines()
        .enumerate()
        .map(|(line_no, line)| parse_run_line(line, line_no + 1))
        .collect()
}

fn count_relevant_docs(profiles: &RelevancyProfiles, topic: &str) -> i32 {
    profiles.get(topic).map_or(0, |js| js.iter().map(|j| j.relevant).sum())
}

fn is_relevant(profiles: &RelevancyProfiles, topic: &str, docno: &str) -> i32 {
    profiles
        .get(topic)
        .and_then(|js| js.iter().find(|j| j.docno == docno))
        .map_or(0, |j| j.relevant)
}

fn average_precision(profiles: &RelevancyProfiles, topic_arr: &[RunLine], topic: &str) -> f64 {
    let rel = count_relevant_docs(profiles, topic) as f64;
    let mut running_precision = 0.0;
    let mut n_relevance = 0.0;
    for (i, result) in topic_arr.iter().enumerate() {
        let i = (i + 1) as f64;
        let relevance = is_relevant(profiles, topic, &result.docno) as f64;
        running_precision += relevance;
        let n_precision = running_precision / i;
        n_relevance += n_precision * relevance;
    }
    n_relevance / rel
}

fn precision_10(profiles: &RelevancyProfiles, topic_arr: &[RunLine], topic: &str) -> f64 {
    let mut running_precision = 0.0;
    let mut n_precision = 0.0;
    for i in 1..=10usize {
        if let Some(result) = topic_arr.get(i - 1) {
            running_precision += is_relevant(profiles, topic, &result.docno) as f64;
        }
        n_precision = running_precision / i as f64;
    }
    n_precision
}

fn ideal_ranking_score(profiles: &RelevancyProfiles, topic: &str, n: usize) -> f64 {
    let rel_docs = count_relevant_docs(profiles, topic);
    let mut running_score = 0.0;
    for i in 1..=rel_docs.max(0) {
        running_score += 1.0 / (((i + 1) as f64).log2());
        if i as usize == n {
            break;
        }
    }
    running_score
}

fn ndcg_n(profiles: &RelevancyProfiles, topic_arr: &[RunLine], topic: &str, n: usize) -> f64 {
    let mut running_dcg = 0.0;
    let topic_len = topic_arr.len();
    for (i, result) in topic_arr.iter().enumerate() {
        let i = i + 1;
        let numerator = is_relevant(profiles, topic, &result.docno) as f64;
        let denominator = ((i + 1) as f64).log2();
        running_dcg += numerator / denominator;
        if i == n || i == topic_len {
            let ideal = ideal_ranking_score(profiles, topic, n);
            if ideal == 0.0 {
                return 0.0;
            }
            return running_dcg / ideal;
        }
    }
    0.0
}

/// Per-topic and mean metrics for one run against one set of judgments.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    /// Average precision per topic id.
    pub average_precision: BTreeMap<String, f64>,
    /// P@10 per topic id.
    pub precision_10: BTreeMap<String, f64>,
    /// NDCG@10 per topic id.
    pub ndcg_10: BTreeMap<String, f64>,
    /// NDCG@1000 per topic id.
    pub ndcg_1000: BTreeMap<String, f64>,
    /// Mean average precision across [`EXPECTED_TOPICS`].
    pub mean_average_precision: f64,
    /// Mean P@10 across [`EXPECTED_TOPICS`].
    pub mean_precision_10: f64,
    /// Mean NDCG@10 across [`EXPECTED_TOPICS`].
    pub mean_ndcg_10: f64,
    /// Mean NDCG@1000 across [`EXPECTED_TOPICS`].
    pub mean_ndcg_1000: f64,
}

impl EvaluationReport {
    /// Renders the per-topic lines followed by the four mean summary lines,
    /// three-decimal fixed point throughout.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (topic, v) in &self.average_precision {
            out.push_str(&format!("ap {topic} {v:.3}\n"));
        }
        for (topic, v) in &self.precision_10 {
            out.push_str(&format!("P_10 {topic} {v:.3}\n"));
        }
        for (topic, v) in &self.ndcg_10 {
            out.push_str(&format!("ndcg_cut_10 {topic} {v:.3}\n"));
        }
        for (topic, v) in &self.ndcg_1000 {
            out.push_str(&format!("ndcg_cut_1000 {topic} {v:.3}\n"));
        }
        out.push_str(&format!("mean average precision: {:.3}\n", self.mean_average_precision));
        out.push_str(&format!("mean P@10: {:.3}\n", self.mean_precision_10));
        out.push_str(&format!("mean NDCG@10: {:.3}\n", self.mean_ndcg_10));
        out.push_str(&format!("mean NDCG@1000: {:.3}\n", self.mean_ndcg_1000));
        out
    }
}

fn mean(values: &BTreeMap<String, f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.values().sum::<f64>() / values.len() as f64
}

/// Scores a run file against a qrels file, grouping the run's consecutive
/// same-topic lines and sorting each group by `(score desc, docno desc)`
/// before computing metrics.
///
/// Topics listed in [`EXPECTED_TOPICS`] but absent from the run are
/// backfilled with zero metrics before the means are taken.
pub fn evaluate(qrel_path: &Path, run_path: &Path) -> Result<EvaluationReport, EngineError> {
    let profiles = load_relevancy_profiles(qrel_path)?;
    let results = load_result_profiles(run_path)?;

    let mut average_precision_results: BTreeMap<String, f64> = BTreeMap::new();
    let mut precision_10_results: BTreeMap<String, f64> = BTreeMap::new();
    let mut ndcg_10_results: BTreeMap<String, f64> = BTreeMap::new();
    let mut ndcg_1000_results: BTreeMap<String, f64> = BTreeMap::new();

    let mut current_topic: Option<String> = None;
    let mut current_topic_arr: Vec<RunLine> = Vec::new();

    let mut flush = |topic: &str,
                      arr: &mut Vec<RunLine>,
                      ap: &mut BTreeMap<String, f64>,
                      p10: &mut BTreeMap<String, f64>,
                      n10: &mut BTreeMap<String, f64>,
                      n1000: &mut BTreeMap<String, f64>| {
        arr.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap().then_with(|| b.docno.cmp(&a.docno)));
        ap.insert(topic.to_string(), average_precision(&profiles, arr, topic));
        p10.insert(topic.to_string(), precision_10(&profiles, arr, topic));
        n10.insert(topic.to_string(), ndcg_n(&profiles, arr, topic, 10));
        n1000.insert(topic.to_string(), ndcg_n(&profiles, arr, topic, 1000));
    };

    for line in results {
        if current_topic.is_none() {
            current_topic = Some(line.topic.clone());
        }
        let topic = line.topic.clone();
        if Some(&topic) != current_topic.as_ref() {
            let finished = current_topic.take().unwrap();
            flush(
                &finished,
                &mut current_topic_arr,
                &mut average_precision_results,
                &mut precision_10_results,
                &mut ndcg_10_results,
                &mut ndcg_1000_results,
            );
            current_topic = Some(topic);
            current_topic_arr = Vec::new();
        }
        current_topic_arr.push(line);
    }
    if let Some(topic) = current_topic {
        if !current_topic_arr.is_empty() {
            flush(
                &topic,
                &mut current_topic_arr,
                &mut average_precision_results,
                &mut precision_10_results,
                &mut ndcg_10_results,
                &mut ndcg_1000_results,
            );
        }
    }

    for topic in EXPECTED_TOPICS {
        let topic = topic.to_string();
        average_precision_results.entry(topic.clone()).or_insert(0.0);
        precision_10_results.entry(topic.clone()).or_insert(0.0);
        ndcg_10_results.entry(topic.clone()).or_insert(0.0);
        ndcg_1000_results.entry(topic).or_insert(0.0);
    }

    Ok(EvaluationReport {
        mean_average_precision: mean(&average_precision_results),
        mean_precision_10: mean(&precision_10_results),
        mean_ndcg_10: mean(&ndcg_10_results),
        mean_ndcg_1000: mean(&ndcg_1000_results),
        average_precision: average_precision_results,
        precision_10: precision_10_results,
        ndcg_10: ndcg_10_results,
        ndcg_1000: ndcg_1000_results,
    })
}
