use clap::Parser;

use gemm_bench::cli::BenchArgs;
use gemm_bench::error::BenchError;

fn main() {
    let args = BenchArgs::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_os = "macos")]
fn run(args: &BenchArgs) -> Result<(), BenchError> {
    use gemm_bench::data_gen::MatrixFill;
    use gemm_bench::output;
    use gemm_bench::output::progress::SweepProgress;
    use gemm_bench::sweep;
    use gemm_primitives::{HardwareInfo, MetalContext, MpsGemm};

    let peaks = args.reference_peaks()?;

    let ctx = MetalContext::new()?;
    let hardware = HardwareInfo::detect(&ctx.device);

    println!("gemm-bench: GEMM roofline sweep");
    println!("  Hardware: {}", hardware.chip_name);
    if let Some(gbs) = hardware.known_bandwidth_gbs {
        println!("  Known peak bandwidth: {} GB/s", gbs);
    }
    println!(
        "  Declared peaks: {:.1} GFLOP/s, {:.1} GB/s",
        args.gflops, args.gbps
    );
    println!();

    let progress = SweepProgress::new();
    let mut fill = MatrixFill::new(42);
    let result = {
        let cb = progress.callback();
        sweep::run_sweep(
            |config| {
                let a = fill.matrix(config.m, config.k);
                let b = fill.matrix(config.k, config.n);
                MpsGemm::new(&ctx, config, &a, &b)
            },
            &peaks,
            Some(&cb),
        )
    };
    progress.finish();
    let records = result?;

    output::report::print_records(&records);
    output::table::print_summary(&records);
    output::roofline::print_utilization(&records);

    if let Some(path) = &args.json {
        if let Err(e) = output::json::write_json(path, &records, &hardware, &peaks) {
            eprintln!("Error writing JSON: {}", e);
        }
    }

    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn run(args: &BenchArgs) -> Result<(), BenchError> {
    let _ = args.reference_peaks()?;
    Err(gemm_primitives::BackendError::DeviceNotFound.into())
}
