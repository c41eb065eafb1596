use crate::cmd::open_session;
use crate::output::{bar, print_json, print_table};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (config, session) = open_session(root)?;
    let report = session.results(config.results.bar_max);

    if json {
        return print_json(&report);
    }

    if !session.state().is_finished() {
        println!(
            "Assessment in progress ({}%). Results so far:\n",
            session.state().progress
        );
    }

    println!("ANALYSIS REPORT");
    println!("===============\n");
    println!("Archetype: {}", report.archetype_title);
    println!("{}\n", report.archetype_description);
    println!("Cognitive style: {} Thinker", report.cognitive_style);
    println!("{}\n", report.cognitive_description);

    let rows = report
        .profile
        .iter()
        .map(|e| {
            vec![
                e.trait_name.to_string(),
                e.value.to_string(),
                e.band.to_string(),
                bar(e.bar_width, 20),
            ]
        })
        .collect();
    print_table(&["TRAIT", "VALUE", "STRENGTH", ""], rows);

    println!();
    println!(
        "Score:      {} points ({} speed bonus)",
        report.score.points, report.score.time_bonus
    );
    if !report.score.badges.is_empty() {
        println!("Badges:     {}", report.score.badges.join(", "));
    }
    println!("Decisions:  {}", report.choices_made);
    println!("Scenarios:  {}", report.completed_scenarios);
    println!("Total time: {}", report.total_time);
    Ok(())
}
