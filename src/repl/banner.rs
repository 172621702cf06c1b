use console::{style, Key, Term};
use tui_banner::{Align, Banner, ColorMode, Fill, Gradient, GradientDirection, Palette};

/// Color palette: greens and yellows of the Brazilian flag.
const BRAND: u8 = 35;       // green
const BRAND_DIM: u8 = 22;   // dark green
const ACCENT: u8 = 220;     // yellow
const DIM: u8 = 240;        // dim text

/// The separator character (horizontal ellipsis).
const SEP_CHAR: char = '\u{2026}'; // …

const TAGLINE: &str = "Educação financeira contra golpes";

/// Show the full-screen splash banner.
/// Waits for Enter, then clears and returns.
pub fn show_splash() {
    let term = Term::stdout();
    let _ = term.clear_screen();

    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");

    let (_, term_cols) = term.size();
    let term_w = term_cols as usize;

    let center = |text_w: usize| -> String {
        if term_w > text_w + 4 {
            " ".repeat((term_w - text_w) / 2)
        } else {
            "  ".to_string()
        }
    };

    let palette = Palette::from_hex(&[
        "#FFDF00", // yellow
        "#3CB371", // medium green
        "#009C3B", // flag green
        "#002776", // flag blue
    ]);
    let gradient = Gradient::new(palette.colors().to_vec(), GradientDirection::Diagonal);

    let banner_text = match Banner::new("GUARDIAO") {
        Ok(b) => b
            .gradient(gradient)
            .fill(Fill::Keep)
            .align(Align::Center)
            .trim_vertical(true)
            .edge_shade(0.35, '\u{2591}') // ░
            .color_mode(ColorMode::TrueColor)
            .width(term_w)
            .render(),
        Err(_) => {
            let p = center(10);
            format!("{}{}\n", p, style("O GUARDIÃO").color256(BRAND).bold())
        }
    };

    println!();
    print!("{}", banner_text);

    {
        let version_str = format!("v{} ({})", version, git_hash);
        let p = center(version_str.len());
        println!("{}{}", p, style(version_str).color256(DIM));
    }

    let scene_w = term_w.clamp(40, 76);
    let pad = center(scene_w);
    println!("{}{}", pad, style(SEP_CHAR.to_string().repeat(scene_w)).color256(BRAND_DIM));
    {
        let p = center(TAGLINE.chars().count());
        println!("{}{}", p, style(TAGLINE).white().bold());
    }
    println!("{}{}", pad, style(SEP_CHAR.to_string().repeat(scene_w)).color256(BRAND_DIM));
    println!();

    print_notice_box(&center);
    println!();

    let guide: &[(&str, &str)] = &[
        ("<pergunta>", "Pergunte sobre qualquer golpe financeiro"),
        ("/analysis", "Estatísticas atuais"),
        ("/top [N]", "Golpes mais frequentes"),
        ("/run", "Coletar novos relatos"),
        ("/help", "Todos os comandos"),
    ];
    {
        let p = center(56);
        println!("{}  {}", p, style("Como usar:").white().bold());
        println!();
        for (cmd, desc) in guide {
            println!("{}    {:<14} {}", p, style(cmd).color256(BRAND), style(desc).dim());
        }
    }
    println!();

    {
        let p = center(28);
        println!("{}  Pressione {} para continuar", p, style("Enter").white().bold());
    }

    loop {
        match term.read_key() {
            Ok(Key::Enter) | Ok(Key::Escape) | Err(_) => break,
            _ => {}
        }
    }

    let _ = term.clear_screen();
    print_header();
}

/// One-line header shown after the splash or when the screen is cleared.
pub fn print_header() {
    println!(
        "  {} {}  {}",
        style("O Guardião").color256(BRAND).bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style("\u{2714} pronto").green().dim(),
    );
    println!("  {} {}", style("Digite sua pergunta ou").dim(), style("/help").white().bold());
    println!();
}

/// Print the educational-use notice inside a box-drawn border.
fn print_notice_box(center: &dyn Fn(usize) -> String) {
    let notice_lines: &[&str] = &[
        "As respostas têm caráter educativo e podem conter imprecisões.",
        "Em caso de golpe, contate seu banco e registre um boletim de ocorrência.",
        "Nunca compartilhe senhas ou códigos recebidos por SMS.",
    ];

    let content_w = notice_lines.iter().map(|l| l.chars().count()).max().unwrap_or(40);
    let inner_w = content_w + 4;
    let pad = center(inner_w + 2);
    let hbar = "\u{2500}".repeat(inner_w);

    println!(
        "{}{}{}{}",
        pad,
        style("\u{250c}").color256(BRAND_DIM),
        style(&hbar).color256(BRAND_DIM),
        style("\u{2510}").color256(BRAND_DIM),
    );

    {
        let header = "AVISO";
        let icon = "\u{26a0}";
        let text_w = 1 + 2 + header.len();
        let left = (inner_w.saturating_sub(text_w)) / 2;
        let right = inner_w.saturating_sub(text_w + left);
        println!(
            "{}{}{}{}  {}{}{}",
            pad,
            style("\u{2502}").color256(BRAND_DIM),
            " ".repeat(left),
            style(icon).color256(ACCENT).bold(),
            style(header).color256(ACCENT).bold(),
            " ".repeat(right),
            style("\u{2502}").color256(BRAND_DIM),
        );
    }

    for line in notice_lines {
        let right_pad = inner_w.saturating_sub(line.chars().count() + 2);
        println!(
            "{}{}  {}{}{}",
            pad,
            style("\u{2502}").color256(BRAND_DIM),
            style(line).dim(),
            " ".repeat(right_pad),
            style("\u{2502}").color256(BRAND_DIM),
        );
    }

    println!(
        "{}{}{}{}",
        pad,
        style("\u{2514}").color256(BRAND_DIM),
        style(&hbar).color256(BRAND_DIM),
        style("\u{2518}").color256(BRAND_DIM),
    );
}
