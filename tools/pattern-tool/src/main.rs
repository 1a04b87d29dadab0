// Copyright 2025. Command-line front end for dither-gamma patterns.
//
// Usage:
//   pattern-tool render [-l <layout>] [-p <preset> | -c <v,v,..> | -g <gamma>] [-s <WxH>]
//                       [--config <file>] [--gray] [-o <output.png|bmp|raw>]
//   pattern-tool bands [same options as render]
//   pattern-tool presets [<layout>]
//   pattern-tool layouts

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Result};
use dither_gamma::pixfmt_gray::PixfmtGray8;
use dither_gamma::{CurvePresetStore, Layout, PatternRenderer};
use log::info;
use pattern_tool::config::{default_config_path, ToolConfig};
use pattern_tool::request::{CliOptions, CurveSource, RenderRequest};
use pattern_tool::{save_gray_png, save_image};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        process::exit(1);
    };

    match command.as_str() {
        "render" => cmd_render(&args[2..]),
        "bands" => cmd_bands(&args[2..]),
        "presets" => cmd_presets(&args[2..]),
        "layouts" => {
            cmd_layouts();
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            bail!("unknown command: {}", command)
        }
    }
}

fn print_usage() {
    eprintln!("pattern-tool - dithered gamma test patterns");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render [-l <layout>] [-p <preset> | -c <v,v,..> | -g <gamma>] [-s <WxH>] [--gray] [-o <out>]");
    eprintln!("      Render a pattern to .png, .bmp or .raw (RGBA). --gray writes 8-bit PNG.");
    eprintln!("      -g srgb|linear|<exponent> renders the reference curve of an ideal display.");
    eprintln!();
    eprintln!("  bands [render options]");
    eprintln!("      Print each band's rows and luma values.");
    eprintln!();
    eprintln!("  presets [<layout>]");
    eprintln!("      List presets and their values.");
    eprintln!();
    eprintln!("  layouts");
    eprintln!("      List layouts.");
    eprintln!();
    eprintln!("All commands accept --config <file>. Without it the per-user config is read");
    if let Some(path) = default_config_path() {
        eprintln!("from {}.", path.display());
    } else {
        eprintln!("if one exists.");
    }
}

fn resolve(args: &[String]) -> Result<RenderRequest> {
    let opts = CliOptions::parse(args)?;
    let config = ToolConfig::discover(opts.config.as_deref())?;
    RenderRequest::resolve(&opts, &config)
}

fn describe(req: &RenderRequest) -> String {
    match &req.source {
        CurveSource::Preset(name) => format!("preset {} {}", name, req.curve),
        CurveSource::Values => format!("values {}", req.curve),
        CurveSource::Gamma(gamma) => format!("gamma {} {}", gamma, req.curve),
    }
}

fn cmd_render(args: &[String]) -> Result<()> {
    let req = resolve(args)?;
    let renderer = PatternRenderer::new(&req.curve);
    info!("rendering {}x{} from {}", req.width, req.height, describe(&req));

    if req.gray {
        let mut luma = vec![0u8; req.width as usize * req.height as usize];
        let mut pf = PixfmtGray8::new(&mut luma, req.width, req.height);
        renderer.render_into(&mut pf);
        save_gray_png(&req.output, req.width, req.height, &luma)?;
    } else {
        let buf = renderer.render(req.width, req.height);
        save_image(&req.output, &buf)?;
    }

    println!(
        "Rendered {}x{} {} to {}",
        req.width,
        req.height,
        describe(&req),
        req.output.display()
    );
    Ok(())
}

fn cmd_bands(args: &[String]) -> Result<()> {
    let req = resolve(args)?;
    let renderer = PatternRenderer::new(&req.curve);
    let (x0, x1) = renderer.solid_region().span(req.width);

    println!("{} at {}x{}", describe(&req), req.width, req.height);
    println!("solid columns {}..{}", x0, x1);
    println!("{:>4}  {:>11}  {:>5}  {:>5}  {:>5}", "band", "rows", "solid", "light", "dark");
    for (i, (band, rows)) in renderer.band_spans(req.height).enumerate() {
        println!(
            "{:>4}  {:>11}  {:>5}  {:>5}  {:>5}",
            i,
            format!("{}..{}", rows.start, rows.end),
            band.solid,
            band.dither_light,
            band.dither_dark
        );
    }
    Ok(())
}

fn cmd_presets(args: &[String]) -> Result<()> {
    let mut layouts = Vec::new();
    let mut config_path: Option<PathBuf> = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--config" && i + 1 < args.len() {
            config_path = Some(PathBuf::from(&args[i + 1]));
            i += 2;
        } else {
            layouts.push(args[i].parse::<Layout>()?);
            i += 1;
        }
    }
    if layouts.is_empty() {
        layouts.extend(Layout::ALL);
    }

    let config = ToolConfig::discover(config_path.as_deref())?;
    for layout in layouts {
        let mut store = CurvePresetStore::new(layout);
        config.register_presets(&mut store)?;
        println!("{} ({}):", layout, layout.point_labels().join(" "));
        for name in store.names() {
            let curve = store.get(name)?;
            println!("  {:<12} {:?}", name, curve.points());
        }
    }
    Ok(())
}

fn cmd_layouts() {
    for layout in Layout::ALL {
        let (w, h) = layout.canvas_size();
        println!(
            "{:<12} {} points, {}x{} canvas, solid {:?}",
            layout.name(),
            layout.point_count(),
            w,
            h,
            layout.solid_region()
        );
    }
}
