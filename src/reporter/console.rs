//! Console reporter with colored output

use crate::pipeline::{BatchReport, BatchTotals, Progress};
use crate::{BatchVerdict, ComparisonRecord, InsightResult, Sentiment, Winner};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show the full result JSON per record
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Print one finished record while the batch is running
    pub fn report_progress(&self, progress: Progress<'_>) {
        println!();
        println!(
            "{} {}",
            format!("[{}/{}]", progress.done, progress.total).dimmed(),
            format!("📝 Feedback {}", progress.record.id).bold()
        );
        self.print_record(progress.record);
    }

    /// Print the verdict block for a finished batch
    pub fn report_summary(&self, batch: &BatchReport) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", format!("🏁 Final Conclusion (batch {})", batch.batch_id).bold());
        println!("{}", "═".repeat(60));
        self.print_verdict(&batch.verdict);
        self.print_totals(&batch.totals);
        println!();
    }

    /// Quiet mode: one line with the winner
    pub fn report_quiet(&self, batch: &BatchReport) {
        println!(
            "{}: baseline {} / model {} → {}",
            batch.batch_id,
            batch.verdict.baseline_score,
            batch.verdict.model_score,
            self.colorize_winner(batch.verdict.winner)
        );
    }

    /// Print a baseline-only result (offline mode)
    pub fn report_baseline(&self, id: usize, text: &str, result: &InsightResult) {
        println!();
        println!("{}", format!("📝 Feedback {}", id).bold());
        println!("   {}", text.italic());
        self.print_result("🤖 Baseline", result);
    }

    fn print_record(&self, record: &ComparisonRecord) {
        println!("   {}", record.text.italic());
        self.print_result("🤖 Baseline", &record.baseline);
        self.print_result("✨ Model", &record.model);
    }

    fn print_result(&self, label: &str, result: &InsightResult) {
        let sentiment = result
            .sentiment
            .map(|s| self.colorize_sentiment(s))
            .unwrap_or_else(|| "—".dimmed());
        println!(
            "   {} {} {}",
            label.bold(),
            sentiment,
            format!(
                "({:.4}s, ${:.6})",
                result.meta.latency_seconds, result.meta.cost_usd
            )
            .dimmed()
        );

        if self.verbose {
            let json = serde_json::to_string_pretty(result).unwrap_or_default();
            for line in json.lines() {
                println!("      {}", line.dimmed());
            }
            return;
        }

        if let Some(ref summary) = result.summary {
            println!("      {}", summary);
        }
        if !result.themes().is_empty() {
            println!("      Themes: {}", result.themes().join(", "));
        }
        for complaint in result.complaints() {
            println!("      {} {}", "✗".red(), complaint);
        }
        for rec in result.recommendations() {
            println!("      {} {}", "→".cyan(), rec);
        }
    }

    fn print_verdict(&self, verdict: &BatchVerdict) {
        println!(
            "   Baseline score: {}",
            verdict.baseline_score.to_string().bold()
        );
        println!(
            "   Model score:    {}",
            verdict.model_score.to_string().bold()
        );
        println!(
            "   Winner:         {}",
            self.colorize_winner(verdict.winner)
        );
        println!();
        println!("   🏆 {}", verdict.reason);
    }

    fn print_totals(&self, totals: &BatchTotals) {
        if totals.records == 0 {
            return;
        }
        println!();
        println!("   Records analyzed:  {}", totals.records);
        println!(
            "   Model cost (est.): ${:.6} ({} tokens)",
            totals.model_cost_usd, totals.model_tokens
        );
        println!(
            "   Mean latency:      baseline {:.4}s, model {:.4}s",
            totals.baseline_mean_latency_seconds, totals.model_mean_latency_seconds
        );
    }

    fn colorize_sentiment(&self, sentiment: Sentiment) -> colored::ColoredString {
        let s = sentiment.to_string();
        if !self.use_colors {
            return s.normal();
        }
        match sentiment {
            Sentiment::Positive => s.green(),
            Sentiment::Neutral => s.normal(),
            Sentiment::Negative => s.red(),
            Sentiment::Mixed => s.yellow(),
        }
    }

    fn colorize_winner(&self, winner: Winner) -> colored::ColoredString {
        let s = winner.to_string();
        if !self.use_colors {
            return s.normal();
        }
        match winner {
            Winner::Model => s.green().bold(),
            Winner::Baseline => s.cyan().bold(),
            Winner::Tie => s.yellow(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
