use crate::timer::Timer;

/// Per-kernel timers owned by one simulation.
pub struct AppTimers {
    pub step: Timer,
    pub halo: Timer,
    pub momentum: Timer,
    pub continuity: Timer,
}

impl AppTimers {
    pub fn new() -> Self {
        AppTimers {
            step: Timer::new("Total Step"),
            halo: Timer::new("Halo Exchange"),
            momentum: Timer::new("Momentum"),
            continuity: Timer::new("Continuity"),
        }
    }

    fn regions(&self) -> [&Timer; 4] {
        [&self.step, &self.halo, &self.momentum, &self.continuity]
    }

    pub fn generate_report(&self) -> String {
        let mut report = String::from(
            "\n\
             -------------------------------------------------------------------------------------\n\
             Region                        Count               Total        Average        Std Dev\n\
             -------------------------------------------------------------------------------------",
        );

        for timer in self.regions().iter() {
            report.push_str(&format!(
                "\n{:<30}{:<10}{:>15}{:>15}{:>15}",
                timer.region,
                timer.count(),
                format!("{:3.5?}", timer.total()),
                format_optional(timer.mean()),
                format_optional(timer.std_dev()),
            ));
        }

        report
    }

    pub fn generate_timings_csv(&self) -> String {
        let mut rows = vec![[
            "Region".to_owned(),
            "Count".to_owned(),
            "Total".to_owned(),
            "Average".to_owned(),
            "Std Dev".to_owned(),
        ]];

        for timer in self.regions().iter() {
            rows.push([
                timer.region.to_owned(),
                format!("{}", timer.count()),
                format!("{:?}", timer.total()),
                format_optional(timer.mean()),
                format_optional(timer.std_dev()),
            ]);
        }

        let field_separator = ",";
        let line_separator = "\n";

        rows.iter()
            .map(|row| row.join(field_separator))
            .collect::<Vec<String>>()
            .join(line_separator)
    }
}

fn format_optional(value: Option<std::time::Duration>) -> String {
    match value {
        Some(duration) => format!("{:3.5?}", duration),
        None => "-".to_owned(),
    }
}
