// ----------------------------------- CLI -----------------------------------
use std::path::PathBuf;

use clap::Parser;

#[derive(clap::Parser, Debug, Clone)]
#[clap(name = "xray_report", about = "Lesion/background contrast of simulated breast radiographs")]
pub struct Cli {

    /// TOML configuration file. Defaults are used for anything it omits.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Phantom width and height in pixels
    #[clap(short, long, default_value = "256")]
    pub size: usize,

    /// Override the lesion radius of the configuration, in pixels
    #[clap(short, long)]
    pub lesion_radius: Option<f32>,

    /// Override the compression factor of the configuration
    #[clap(short = 'k', long)]
    pub compression: Option<f32>,

    /// Skip the sinogram
    #[clap(long)]
    pub no_sinogram: bool,

    #[cfg(not(feature = "serial"))]
    /// Maximum number of rayon threads
    #[clap(short = 'j', long, default_value = "4")]
    pub num_threads: usize,
}

// --------------------------------------------------------------------------------
use std::error::Error;

use xraysim::config::{read_config_file, Config};
use xraysim::fom::RoiReport;
use xraysim::logger;
use xraysim::utils::timing::Progress;

fn main() -> Result<(), Box<dyn Error>> {

    let args = Cli::parse();
    logger::init();

    #[cfg(not(feature = "serial"))]
    match rayon::ThreadPoolBuilder::new().num_threads(args.num_threads).build_global() {
        Err(e) => println!("{}", e),
        Ok(_)  => println!("Using up to {} threads.", args.num_threads),
    }

    let mut progress = Progress::new();

    let config = match &args.config {
        Some(path) => {
            progress.start("Reading configuration");
            let config = read_config_file(path)?;
            progress.done();
            config
        }
        None       => Config::default(),
    };
    let params    = config.acquisition()?;
    let builder   = config.phantom_builder();
    let projector = config.projector();
    let radius    = args.lesion_radius.unwrap_or(builder.breast.lesion_radius);
    let factor    = args.compression  .unwrap_or(builder.breast.compression_factor);
    let n         = args.size;

    progress.start("Building native phantom");
    let (native, native_info) = builder.anatomical(n, n, radius, None)?;
    progress.done();

    progress.start("Building compressed phantom");
    let (compressed, compressed_info) = builder.anatomical(n, n, radius, Some(factor))?;
    progress.done();

    progress.start("Rendering radiographs");
    let native_image     = projector.radiograph(&native    , &params)?;
    let compressed_image = projector.radiograph(&compressed, &params)?;
    progress.done();

    if !args.no_sinogram {
        progress.start("Computing sinogram");
        let (sinogram, angles) = projector.sinogram(&native, &config.sinogram, &params)?;
        progress.done();
        println!("Sinogram: {} angles × {} detector columns", angles.len(), sinogram.ncols());
    }

    println!();
    println!("kVp {}, exposure {} s, filtration {} mm, grid {}, SID {} mm, SDD {} mm",
             params.kvp, params.exposure_time, params.filtration_mm,
             params.grid_ratio, params.sid, params.sdd);

    let reports = [
        ("native μ-map"          , RoiReport::measure(&native          , &native_info    )?),
        ("native radiograph"     , RoiReport::measure(&native_image    , &native_info    )?),
        ("compressed μ-map"      , RoiReport::measure(&compressed      , &compressed_info)?),
        ("compressed radiograph" , RoiReport::measure(&compressed_image, &compressed_info)?),
    ];
    for (title, report) in reports {
        println!("\n{title}\n{report}");
    }
    Ok(())
}
