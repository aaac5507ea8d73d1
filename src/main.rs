//! Operator console for the rover agent.
//!
//! One-shot commands against a running agent:
//!   ra-client version
//!   ra-client -a rover:8888 image --camera 0 --format mono8 -o frame.raw
//!   ra-client ptu set --pan 10.5 --tilt -20
//!   ra-client feature set --camera 2 shutter 0.02
//!
//! The agent address comes from `-a`, the `AGENT_ADDR` environment variable,
//! or the built-in default, in that order.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use ra_client::feature::{DiscardMode, Feature, FeatureKind, FeatureMode, FeatureValue};
use ra_client::proto::{
    pancam_camera_name, JointSelect, IMAGE_AUTOEXPOSE, IMAGE_PREVIOUS, IMAGE_SYNC, META_SAVE_CAM,
    META_SAVE_GPS, META_SAVE_IMU,
};
use ra_client::subsys::{aerobot, arm, camera::CameraClient, mast, system, vicon};
use ra_client::{AgentConnection, ImageFormat, Transport};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "ra-client", about = "Rover agent operator console")]
struct Cli {
    /// Agent address as host:port (falls back to $AGENT_ADDR, then the
    /// built-in default).
    #[arg(short = 'a', long = "agent")]
    agent: Option<String>,

    /// Socket read/write deadline in seconds (no deadline when omitted).
    #[arg(long)]
    timeout: Option<u64>,

    /// Address the AeroCam subsystem instead of the PanCam.
    #[arg(long)]
    aerocam: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Query the agent's protocol version.
    Version,
    /// Ask the agent process to shut down.
    Shutdown,
    /// Capture an image and write the raw frame to a file.
    Image {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
        #[arg(short, long, value_enum, default_value = "mono8")]
        format: ImageFormat,
        /// Run auto-exposure before capturing.
        #[arg(long)]
        ae: bool,
        /// Synchronized capture across cameras.
        #[arg(long)]
        sync: bool,
        /// Fetch the previously captured frame instead of exposing a new one.
        #[arg(long)]
        previous: bool,
        /// Also save IMU orientation with the frame's metadata.
        #[arg(long)]
        imu: bool,
        /// Also save GPS position with the frame's metadata.
        #[arg(long)]
        gps: bool,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Print the metadata of the most recent capture.
    Metadata {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
        #[arg(long)]
        json: bool,
    },
    /// Print the agent's camera configuration table.
    Config {
        #[arg(long)]
        json: bool,
    },
    /// Read or write a camera feature.
    Feature {
        #[command(subcommand)]
        op: FeatureOp,
    },
    /// Read or select the filter wheel position.
    Filter {
        #[command(subcommand)]
        op: FilterOp,
    },
    /// Discard frames before the next capture.
    Discard {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
        #[arg(short, long, default_value_t = 1)]
        frames: i32,
        #[arg(short, long, value_enum, default_value = "fixed")]
        mode: DiscardMode,
    },
    /// Mast pan-tilt unit control.
    Ptu {
        #[command(subcommand)]
        op: PtuOp,
    },
    /// Arm control.
    Arm {
        #[command(subcommand)]
        op: ArmOp,
    },
    /// Aerobot platform telemetry.
    Aerobot {
        #[command(subcommand)]
        op: AerobotOp,
    },
    /// Vicon-tracked pan/tilt readout.
    Vicon,
}

#[derive(Debug, Subcommand)]
enum FeatureOp {
    Get {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
        #[arg(value_enum)]
        feature: Feature,
    },
    /// Set a feature.  Integer features take an integer, absolute features a
    /// float, paired features `a,b`.
    Set {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
        #[arg(value_enum)]
        feature: Feature,
        value: String,
    },
    GetMode {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
        #[arg(value_enum)]
        feature: Feature,
    },
    SetMode {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
        #[arg(value_enum)]
        feature: Feature,
        #[arg(value_enum)]
        mode: FeatureMode,
    },
}

#[derive(Debug, Subcommand)]
enum FilterOp {
    Get {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
    },
    Set {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
        filter: i32,
    },
    Info {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
    },
    Stow {
        #[arg(short, long, default_value_t = 0)]
        camera: i32,
    },
}

#[derive(Debug, Subcommand)]
enum PtuOp {
    Set {
        #[arg(long)]
        pan: Option<f64>,
        #[arg(long)]
        tilt: Option<f64>,
    },
    Get {
        #[arg(long, value_enum, default_value = "measured")]
        how: JointSelectArg,
    },
    Stow,
}

#[derive(Debug, Subcommand)]
enum ArmOp {
    Set {
        #[arg(long)]
        base: f64,
        #[arg(long)]
        shoulder: f64,
        #[arg(long)]
        elbow: f64,
    },
    Get {
        #[arg(long, value_enum, default_value = "measured")]
        how: JointSelectArg,
    },
    Stow,
}

#[derive(Debug, Subcommand)]
enum AerobotOp {
    Orientation,
    Position,
    Height,
    Tether,
    ResetImu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum JointSelectArg {
    Commanded,
    Rounded,
    Measured,
}

impl From<JointSelectArg> for JointSelect {
    fn from(v: JointSelectArg) -> JointSelect {
        match v {
            JointSelectArg::Commanded => JointSelect::Commanded,
            JointSelectArg::Rounded => JointSelect::Rounded,
            JointSelectArg::Measured => JointSelect::Measured,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let mut conn =
        AgentConnection::new(cli.agent.as_deref()).context("resolving agent address")?;
    if let Some(secs) = cli.timeout {
        conn.set_timeout(Some(Duration::from_secs(secs)))?;
    }

    let (major, minor) = system::connect(&mut conn, None)
        .with_context(|| format!("connecting to agent at {}", conn.addr()))?;
    info!("agent protocol {major}.{minor}");

    let result = run(&cli, &mut conn);

    // After a shutdown the agent is gone; otherwise leave politely.
    match &cli.command {
        Command::Shutdown => conn.close(),
        _ => {
            if let Err(e) = system::disconnect(&mut conn) {
                info!("disconnect: {e}");
                conn.close();
            }
        }
    }
    result
}

fn run(cli: &Cli, conn: &mut AgentConnection) -> anyhow::Result<()> {
    let mut cam = if cli.aerocam {
        CameraClient::aerocam()
    } else {
        CameraClient::pancam()
    };

    match &cli.command {
        Command::Version => {
            let version = system::get_version(conn)?;
            println!("{version}");
        }
        Command::Shutdown => {
            system::shutdown(conn)?;
            println!("agent shutting down");
        }
        Command::Image { camera, format, ae, sync, previous, imu, gps, out } => {
            let mut flags = META_SAVE_CAM;
            if *imu {
                flags |= META_SAVE_IMU;
            }
            if *gps {
                flags |= META_SAVE_GPS;
            }
            if *ae {
                flags |= IMAGE_AUTOEXPOSE;
            }
            if *sync {
                flags |= IMAGE_SYNC;
            }
            if *previous {
                flags |= IMAGE_PREVIOUS;
            }
            let frame = cam.get_image(conn, *camera, *format, flags)?;
            fs::write(out, &frame.data)
                .with_context(|| format!("writing {}", out.display()))?;
            let name = if cli.aerocam { "ACAM" } else { pancam_camera_name(*camera) };
            println!(
                "{} {}x{} depth {} ({} bytes) -> {}",
                name,
                frame.width,
                frame.height,
                frame.depth,
                frame.len(),
                out.display()
            );
        }
        Command::Metadata { camera, json } => {
            let md = cam.get_image_metadata(conn, *camera)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&md)?);
            } else {
                if let Some(c) = &md.camera {
                    let when = c
                        .timestamp_utc()
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| format!("{:.3}", c.timestamp));
                    println!(
                        "camera {}: {} shutter {:.6}s gain {} filter {}",
                        c.camera_id, when, c.shutter, c.gain, c.filter
                    );
                }
                if let Some(i) = &md.imu {
                    println!("imu: roll {:.4} pitch {:.4} yaw {:.4}", i.roll, i.pitch, i.yaw);
                }
                if let Some(g) = &md.gps {
                    println!(
                        "gps: lat {:.7} lon {:.7} alt {:.3}m",
                        g.latitude, g.longitude, g.altitude
                    );
                }
            }
        }
        Command::Config { json } => {
            let config = cam.get_config(conn)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                let mut ids: Vec<&i32> = config.keys().collect();
                ids.sort();
                for id in ids {
                    let c = &config[id];
                    println!("{}\t{}\t{}\t{}\t{}", c.camera_id, c.name, c.class, c.model, c.desc);
                }
            }
        }
        Command::Feature { op } => match op {
            FeatureOp::Get { camera, feature } => {
                let value = cam.get_feature(conn, *camera, *feature)?;
                println!("{value}");
            }
            FeatureOp::Set { camera, feature, value } => {
                let value = parse_feature_value(*feature, value)?;
                cam.set_feature(conn, *camera, *feature, value)?;
            }
            FeatureOp::GetMode { camera, feature } => {
                let mode = cam.get_feature_mode(conn, *camera, *feature)?;
                println!("{mode:?}");
            }
            FeatureOp::SetMode { camera, feature, mode } => {
                cam.set_feature_mode(conn, *camera, *feature, *mode)?;
            }
        },
        Command::Filter { op } => match op {
            FilterOp::Get { camera } => println!("{}", cam.get_filter(conn, *camera)?),
            FilterOp::Set { camera, filter } => cam.set_filter(conn, *camera, *filter)?,
            FilterOp::Info { camera } => {
                let info = cam.get_filter_info(conn, *camera)?;
                println!(
                    "filter {} centre {}nm bandwidth {}nm set {}",
                    info.filter, info.center_nm, info.bandwidth_nm, info.filter_set
                );
            }
            FilterOp::Stow { camera } => cam.stow_filters(conn, *camera)?,
        },
        Command::Discard { camera, frames, mode } => {
            let (v1, v2) = cam.discard_frames(conn, *camera, *frames, *mode)?;
            println!("{v1} {v2}");
        }
        Command::Ptu { op } => match op {
            PtuOp::Set { pan, tilt } => match (pan, tilt) {
                (Some(p), Some(t)) => mast::set_pan_tilt(conn, *p, *t)?,
                (Some(p), None) => mast::set_pan(conn, *p)?,
                (None, Some(t)) => mast::set_tilt(conn, *t)?,
                (None, None) => anyhow::bail!("ptu set needs --pan and/or --tilt"),
            },
            PtuOp::Get { how } => {
                let (pan, tilt) = mast::get_pan_tilt(conn, (*how).into())?;
                println!("pan {pan:.6} tilt {tilt:.6}");
            }
            PtuOp::Stow => mast::stow(conn)?,
        },
        Command::Arm { op } => match op {
            ArmOp::Set { base, shoulder, elbow } => {
                arm::set_joints(conn, *base, *shoulder, *elbow)?;
            }
            ArmOp::Get { how } => {
                let (base, shoulder, elbow) = arm::get_joints(conn, (*how).into())?;
                println!("base {base:.6} shoulder {shoulder:.6} elbow {elbow:.6}");
            }
            ArmOp::Stow => arm::stow(conn)?,
        },
        Command::Aerobot { op } => match op {
            AerobotOp::Orientation => {
                let (roll, pitch, yaw) = aerobot::get_orientation(conn)?;
                println!("roll {roll:.7} pitch {pitch:.7} yaw {yaw:.7}");
            }
            AerobotOp::Position => {
                let fix = aerobot::get_position(conn)?;
                println!(
                    "lat {:.7} lon {:.7} alt {:.3}m fix {}",
                    fix.latitude, fix.longitude, fix.altitude, fix.fix_mode
                );
            }
            AerobotOp::Height => println!("{:.3}m", aerobot::get_height(conn)?),
            AerobotOp::Tether => {
                let (azimuth, elevation) = aerobot::get_tether_angles(conn)?;
                println!("azimuth {azimuth:.7} elevation {elevation:.7}");
            }
            AerobotOp::ResetImu => aerobot::reset_imu(conn)?,
        },
        Command::Vicon => {
            let (pan, tilt) = vicon::get_pan_tilt(conn)?;
            println!("pan {pan:.6} tilt {tilt:.6}");
        }
    }
    Ok(())
}

/// Parse a feature value string according to the feature's kind.
fn parse_feature_value(feature: Feature, s: &str) -> anyhow::Result<FeatureValue> {
    match feature.kind() {
        FeatureKind::Int => Ok(FeatureValue::Int(
            s.parse().with_context(|| format!("`{s}` is not an integer"))?,
        )),
        FeatureKind::Abs => Ok(FeatureValue::Abs(
            s.parse().with_context(|| format!("`{s}` is not a float"))?,
        )),
        FeatureKind::Pair => {
            let (a, b) = s
                .split_once(',')
                .with_context(|| format!("`{s}` is not a `a,b` pair"))?;
            Ok(FeatureValue::Pair(
                a.trim().parse().with_context(|| format!("`{a}` is not an integer"))?,
                b.trim().parse().with_context(|| format!("`{b}` is not an integer"))?,
            ))
        }
    }
}
