use std::path::Path;

use console::Style;
use notehead_core::detection::DetectionConfig;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_detection_summary(config: &DetectionConfig, input: &Path, output: &Path) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Notehead Detection"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(18)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );

    match config.blur_kernel_size {
        Some(k) => println!(
            "  {:<14}{}",
            s.label.apply_to("Blur"),
            s.value.apply_to(format!("{k}x{k} Gaussian"))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Blur"),
            s.disabled.apply_to("off")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Threshold"),
        s.method.apply_to(&config.threshold_mode)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Staff kernel"),
        s.value.apply_to(format!("{}x1", config.staff_kernel_width))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Cleanup"),
        s.value.apply_to(format!(
            "{k}x{k} ellipse, open x{}, close x{}",
            config.open_iterations,
            config.close_iterations,
            k = config.cleanup_kernel_size
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Min area"),
        s.value.apply_to(config.area_min)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Aspect"),
        s.value.apply_to(format!(
            "{}..={}",
            config.aspect_range.min, config.aspect_range.max
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!(
            "{}..={} px",
            config.size_range.min, config.size_range.max
        ))
    );
    println!();
}
