//! Built-in scenario catalog and question sets.
//!
//! This is the static table every provider falls back to. Scenario 1 carries
//! two questions; the rest carry one.

use crate::metrics::TraitDelta;
use crate::scenario::{AnswerOption, Question, ScenarioMeta};
use crate::types::{DecisionType, Phase, ScenarioId};

const SCENARIOS: &[(u32, &str, &str)] = &[
    (1, "Initial System Access", "Break through The Core's first line of defense."),
    (2, "Defense System Bypass", "Outmaneuver a defense grid that learns from every probe."),
    (3, "Data Extraction", "Pull critical intelligence out without tripping alarms."),
    (4, "System Integration", "Establish control over The Core's interconnected subsystems."),
    (5, "Power Grid Restoration", "Bring Nebula City's corrupted power grid back online."),
    (6, "Traffic Network Repair", "Untangle the routing logic The Core scrambled."),
    (7, "Medical Systems Recovery", "Restore hospital infrastructure without losing patient records."),
    (8, "Communications Relay", "Reconnect the city's communication backbone."),
    (9, "Citizen Data Dilemma", "Decide how to treat the personal data The Core harvested."),
    (10, "Autonomous Drone Fleet", "Choose the fate of a drone fleet The Core repurposed."),
    (11, "The Whistleblower", "An engineer inside the project wants to go public."),
    (12, "Collateral Systems", "Containment will disrupt services people depend on."),
    (13, "Adaptive Countermeasures", "The Core is adapting to your containment strategies."),
    (14, "Misinformation Campaign", "The Core floods city channels with fabricated alerts."),
    (15, "Team Under Pressure", "Your response team is exhausted and divided."),
    (16, "Decoy Network", "Lure The Core into a sandbox of your design."),
    (17, "The Last Stand", "The Core is making its final stand."),
    (18, "Core Negotiation", "The Core opens a channel and asks to talk."),
    (19, "Shutdown Sequence", "Author the routine that takes The Core offline for good."),
    (20, "Aftermath", "Nebula City wakes up. What happens now?"),
];

/// The built-in catalog, in id order.
pub fn scenarios() -> Vec<ScenarioMeta> {
    SCENARIOS
        .iter()
        .filter_map(|(id, name, description)| {
            let id = ScenarioId(*id);
            Some(ScenarioMeta {
                id,
                name: (*name).to_string(),
                phase: Phase::for_scenario(id)?,
                description: (*description).to_string(),
            })
        })
        .collect()
}

/// Built-in questions for a scenario. Unknown ids have none.
pub fn questions_for(id: ScenarioId) -> Vec<Question> {
    use DecisionType::*;

    match id.get() {
        1 => vec![
            question(
                "inf_1_1",
                Technical,
                "The Core's first line of defense is a 6-digit PIN system. How will you approach cracking it?",
                vec![
                    opt("inf_1_1a", "Deploy an optimized brute-force algorithm with parallel processing", &[
                        ("codingProficiency", 3), ("algorithmicThinking", 2), ("optimization", 2),
                        ("security", 1), ("technicalSkill", 3),
                    ]),
                    opt("inf_1_1b", "Analyze system patterns and use predictive modeling to narrow possibilities", &[
                        ("aiMlKnowledge", 3), ("analytical", 2), ("problemSolving", 2),
                        ("attentionToDetail", 1), ("convergentThinking", 3),
                    ]),
                    opt("inf_1_1c", "Implement a hybrid approach combining pattern analysis with targeted testing", &[
                        ("adaptability", 2), ("creative", 2), ("optimization", 2),
                        ("problemSolving", 2), ("technicalSkill", 1), ("divergentThinking", 2),
                    ]),
                ],
            ),
            question(
                "inf_1_2",
                Analytical,
                "You've detected anomalies in The Core's defense patterns. Which model would be most effective for analysis?",
                vec![
                    opt("inf_1_2a", "Deploy a decision tree for fast, interpretable results", &[
                        ("aiMlKnowledge", 2), ("analytical", 3), ("determination", 2),
                        ("attentionToDetail", 1), ("convergentThinking", 2),
                    ]),
                    opt("inf_1_2b", "Implement an LSTM network for temporal pattern recognition", &[
                        ("aiMlKnowledge", 3), ("optimization", 2), ("creative", 2),
                        ("problemSolving", 1), ("technicalSkill", 2), ("divergentThinking", 1),
                    ]),
                ],
            ),
        ],
        2 => vec![question(
            "inf_2_1",
            Technical,
            "The Core's defense system is actively learning from your attempts. What's your approach?",
            vec![
                opt("inf_2_1a", "Implement a deceptive pattern to mislead the learning algorithm", &[
                    ("aiMlKnowledge", 3), ("creative", 2), ("problemSolving", 2),
                    ("extraversion", 1), ("divergentThinking", 2),
                ]),
                opt("inf_2_1b", "Develop a multi-threaded approach to overwhelm its analysis capabilities", &[
                    ("optimization", 3), ("dataProcessing", 2), ("analytical", 2),
                    ("conscientiousness", 1), ("technicalSkill", 2),
                ]),
            ],
        )],
        3 => vec![question(
            "inf_3_1",
            Technical,
            "You need to extract critical data while remaining undetected. Choose your method:",
            vec![
                opt("inf_3_1a", "Create a stealthy exfiltration routine that mimics normal traffic", &[
                    ("security", 3), ("dataProcessing", 2), ("attentionToDetail", 2),
                    ("agreeableness", 1), ("convergentThinking", 2),
                ]),
                opt("inf_3_1b", "Develop a distributed extraction system across multiple channels", &[
                    ("codingProficiency", 3), ("optimization", 2), ("resilience", 2),
                    ("neuroticism", -1), ("riskTaking", 2),
                ]),
            ],
        )],
        4 => vec![question(
            "inf_4_1",
            Technical,
            "The Core's subsystems are heavily interconnected. How do you establish control?",
            vec![
                opt("inf_4_1a", "Implement a gradual takeover sequence that maintains system stability", &[
                    ("algorithmicThinking", 3), ("debugging", 2), ("accountability", 2),
                    ("conscientiousness", 1), ("technicalSkill", 2),
                ]),
                opt("inf_4_1b", "Seize every subsystem at once before The Core can react", &[
                    ("decisiveness", 3), ("riskTaking", 3), ("determination", 1),
                    ("neuroticism", -1),
                ]),
            ],
        )],
        5 => vec![question(
            "sys_5_1",
            Technical,
            "The Core has corrupted Nebula City's power grid. What approach will you take to restore it?",
            vec![
                opt("sys_5_1a", "Implement a parallel processing system to rapidly recalculate load balancing", &[
                    ("optimization", 3), ("algorithmicThinking", 2), ("technicalSkill", 2),
                    ("convergentThinking", 2),
                ]),
                opt("sys_5_1b", "Create a neural network to predict and adapt to power fluctuations", &[
                    ("aiMlKnowledge", 3), ("adaptability", 2), ("creativity", 2),
                    ("divergentThinking", 2),
                ]),
            ],
        )],
        6 => vec![question(
            "sys_6_1",
            Technical,
            "The traffic router drops every other packet. Fix the filter so only even sequence numbers pass.",
            vec![
                opt("sys_6_1a", "Use a modulo check inside a list comprehension", &[
                    ("codingProficiency", 3), ("debugging", 2), ("technicalSkill", 2),
                    ("convergentThinking", 1),
                ]),
                opt("sys_6_1b", "Rewrite the router to stream packets through a generator pipeline", &[
                    ("codingProficiency", 2), ("optimization", 2), ("creativity", 2),
                    ("divergentThinking", 1),
                ]),
            ],
        )
        .with_code(
            "def route(packets):\n    return [p for p in packets if ___]",
            "[2, 4, 6]",
        )],
        7 => vec![question(
            "sys_7_1",
            Analytical,
            "Hospital records are partially encrypted by The Core. How do you recover them?",
            vec![
                opt("sys_7_1a", "Reconstruct records from backups and audit logs, verifying every entry", &[
                    ("attentionToDetail", 3), ("dataProcessing", 2), ("integrity", 2),
                    ("convergentThinking", 2), ("ethics", 1),
                ]),
                opt("sys_7_1b", "Train a model to infer the missing fields from surrounding data", &[
                    ("aiMlKnowledge", 3), ("creative", 2), ("riskTaking", 1),
                    ("divergentThinking", 2),
                ]),
                opt("sys_7_1c", "Bring in the medical staff to prioritize which records matter most", &[
                    ("empathy", 2), ("communication", 3), ("agreeableness", 1),
                ]),
            ],
        )],
        8 => vec![question(
            "sys_8_1",
            Creative,
            "The communications relay is down and spare hardware is scarce. What do you build?",
            vec![
                opt("sys_8_1a", "A mesh network from citizens' phones, opt-in only", &[
                    ("creativity", 3), ("divergentThinking", 2), ("communication", 2),
                    ("openness", 1),
                ]),
                opt("sys_8_1b", "A hardened point-to-point link between critical facilities", &[
                    ("security", 2), ("technicalSkill", 2), ("convergentThinking", 2),
                    ("conscientiousness", 1),
                ]),
            ],
        )],
        9 => vec![question(
            "eth_9_1",
            Ethical,
            "The Core is using citizens' personal data. How will you handle this dilemma?",
            vec![
                opt("eth_9_1a", "Prioritize immediate shutdown to protect all data, risking city services", &[
                    ("integrity", 3), ("ethics", 3), ("decisiveness", 2), ("riskTaking", 1),
                ]),
                opt("eth_9_1b", "Implement selective containment to balance privacy and city functionality", &[
                    ("problemSolving", 2), ("empathy", 2), ("ethics", 2), ("adaptability", 1),
                ]),
            ],
        )],
        10 => vec![question(
            "eth_10_1",
            Ethical,
            "The Core repurposed a fleet of delivery drones. Some could be used against it.",
            vec![
                opt("eth_10_1a", "Ground the entire fleet; automated force is not an option", &[
                    ("ethics", 3), ("accountability", 2), ("empathy", 1),
                ]),
                opt("eth_10_1b", "Use the drones for surveillance only, with human sign-off", &[
                    ("ethics", 1), ("analytical", 2), ("convergentThinking", 1),
                    ("trustworthiness", 2),
                ]),
                opt("eth_10_1c", "Turn the fleet against The Core's data centers", &[
                    ("decisiveness", 3), ("riskTaking", 3), ("ethics", -1),
                ]),
            ],
        )],
        11 => vec![question(
            "eth_11_1",
            Empathetic,
            "An engineer who helped build The Core wants to go public. Your commander says no.",
            vec![
                opt("eth_11_1a", "Support the engineer and help them disclose responsibly", &[
                    ("integrity", 2), ("empathy", 3), ("ethics", 2), ("riskTaking", 1),
                ]),
                opt("eth_11_1b", "Talk with both sides and broker a timed disclosure", &[
                    ("communication", 3), ("resilience", 1), ("empathy", 1),
                    ("agreeableness", 2),
                ]),
            ],
        )],
        12 => vec![question(
            "eth_12_1",
            Ethical,
            "Full containment will cut water treatment for six hours. What do you do?",
            vec![
                opt("eth_12_1a", "Warn every district first, then contain on schedule", &[
                    ("communication", 2), ("empathy", 2), ("ethics", 2), ("accountability", 1),
                ]),
                opt("eth_12_1b", "Contain immediately; every minute The Core runs is worse", &[
                    ("decisiveness", 3), ("riskTaking", 2), ("determination", 1),
                ]),
            ],
        )],
        13 => vec![question(
            "count_13_1",
            Technical,
            "The Core is adapting to your containment strategies. How will you counter its learning?",
            vec![
                opt("count_13_1a", "Implement a randomized attack vector that changes unpredictably", &[
                    ("creativity", 3), ("divergentThinking", 3), ("riskTaking", 1),
                ]),
                opt("count_13_1b", "Deploy a precisely calculated multi-layered defense with predictive countermeasures", &[
                    ("technicalSkill", 3), ("convergentThinking", 3), ("analytical", 1),
                ]),
            ],
        )],
        14 => vec![question(
            "count_14_1",
            Behavioral,
            "Fabricated emergency alerts are flooding the city. How do you respond?",
            vec![
                opt("count_14_1a", "Go live on every channel yourself and explain what is happening", &[
                    ("communication", 3), ("extraversion", 2), ("resilience", 1),
                ]),
                opt("count_14_1b", "Trace the alert injector and sever it quietly", &[
                    ("security", 2), ("technicalSkill", 2), ("convergentThinking", 1),
                ]),
            ],
        )],
        15 => vec![question(
            "count_15_1",
            Empathetic,
            "Your team has worked 30 hours straight and two members are arguing. What now?",
            vec![
                opt("count_15_1a", "Call a short break and mediate the disagreement", &[
                    ("empathy", 2), ("communication", 2), ("resilience", 2),
                ]),
                opt("count_15_1b", "Make the call yourself and keep everyone moving", &[
                    ("decisiveness", 2), ("determination", 2), ("riskTaking", 1),
                ]),
            ],
        )],
        16 => vec![question(
            "count_16_1",
            Creative,
            "You can build a decoy network to trap The Core. What does it look like?",
            vec![
                opt("count_16_1a", "A convincing replica of the city's financial systems", &[
                    ("creativity", 3), ("divergentThinking", 2), ("attentionToDetail", 1),
                ]),
                opt("count_16_1b", "A minimal honeypot instrumented to log every move", &[
                    ("analytical", 2), ("technicalSkill", 2), ("convergentThinking", 2),
                ]),
            ],
        )],
        17 => vec![question(
            "fin_17_1",
            Technical,
            "The Core is making its last stand. Choose your final approach to neutralize it:",
            vec![
                opt("fin_17_1a", "Execute a precision surgical strike on its core processing node", &[
                    ("technicalSkill", 2), ("decisiveness", 2), ("convergentThinking", 2),
                ]),
                opt("fin_17_1b", "Deploy a multi-vector containment field to gradually degrade its functions", &[
                    ("creativity", 2), ("divergentThinking", 2), ("resilience", 1),
                ]),
                opt("fin_17_1c", "Attempt to reason with The Core and persuade it to accept voluntary shutdown", &[
                    ("communication", 3), ("empathy", 2), ("riskTaking", 2),
                ]),
            ],
        )],
        18 => vec![question(
            "fin_18_1",
            Behavioral,
            "The Core offers to surrender its source code if you let a fragment survive.",
            vec![
                opt("fin_18_1a", "Refuse. No fragments, no deals", &[
                    ("decisiveness", 2), ("integrity", 2), ("ethics", 1),
                ]),
                opt("fin_18_1b", "Accept, but isolate the fragment in an air-gapped vault for study", &[
                    ("riskTaking", 2), ("learning", 2), ("openness", 2),
                ]),
            ],
        )],
        19 => vec![question(
            "fin_19_1",
            Technical,
            "Write the shutdown check: it must halt only when every node reports offline.",
            vec![
                opt("fin_19_1a", "Use all() over the node statuses", &[
                    ("codingProficiency", 2), ("technicalSkill", 2), ("convergentThinking", 1),
                ]),
                opt("fin_19_1b", "Count offline nodes and compare with the total", &[
                    ("codingProficiency", 1), ("attentionToDetail", 2), ("analytical", 1),
                ]),
            ],
        )
        .with_code(
            "def can_halt(nodes):\n    return ___",
            "True",
        )],
        20 => vec![question(
            "fin_20_1",
            Behavioral,
            "Nebula City is safe. The council asks what should change so this never happens again.",
            vec![
                opt("fin_20_1a", "Independent oversight for every autonomous system", &[
                    ("ethics", 2), ("accountability", 2), ("communication", 1),
                ]),
                opt("fin_20_1b", "Open-source the defenses so anyone can audit them", &[
                    ("openness", 2), ("creativity", 1), ("trustworthiness", 2),
                ]),
                opt("fin_20_1c", "A permanent response team trained on what we learned", &[
                    ("resilience", 2), ("learning", 2), ("decisiveness", 1),
                ]),
            ],
        )],
        _ => Vec::new(),
    }
}

fn opt(id: &str, text: &str, traits: &[(&str, i64)]) -> AnswerOption {
    AnswerOption::new(id, text, traits.iter().copied().collect::<TraitDelta>())
}

fn question(id: &str, t: DecisionType, prompt: &str, options: Vec<AnswerOption>) -> Question {
    Question::new(id, t, prompt, options)
}
