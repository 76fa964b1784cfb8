use bevy::prelude::*;

use super::contour::{LineStyle, assemble_contour};
use super::point_cloud::assemble_point_cloud;
use super::surface::{assemble_region, wireframe_overlay};
use crate::engine::colour::{ColourPolicy, RandomColours};
use crate::engine::config::{BuildSettings, EngineConfig, SensorPlacement};
use crate::engine::coordinates::{CoordinateMode, ReferenceFrame};
use crate::engine::error::AssemblyError;
use crate::engine::loading::DecodedScan;
use crate::engine::primitive::{AssembledPrimitive, PrimitiveOrigin};
use crate::scan::{ScanRecord, SensorPointCloud, SilhouetteView};

/// Something assembly noticed but did not fail on.
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyDiagnostic {
    /// Region skipped, siblings still assembled.
    MalformedRegion(AssemblyError),
    /// Zero-node contour, zero-point cloud or a body part with nothing in it.
    EmptyInput { what: String },
}

#[derive(Debug, Default)]
pub struct BuildOutput {
    pub primitives: Vec<(PrimitiveOrigin, AssembledPrimitive)>,
    pub diagnostics: Vec<AssemblyDiagnostic>,
}

impl BuildOutput {
    pub fn count(&self, predicate: impl Fn(&AssembledPrimitive) -> bool) -> usize {
        self.primitives.iter().filter(|(_, p)| predicate(p)).count()
    }

    pub fn malformed_regions(&self) -> impl Iterator<Item = &AssemblyError> {
        self.diagnostics.iter().filter_map(|d| match d {
            AssemblyDiagnostic::MalformedRegion(err) => Some(err),
            AssemblyDiagnostic::EmptyInput { .. } => None,
        })
    }

    fn push(&mut self, origin: PrimitiveOrigin, primitive: AssembledPrimitive) {
        self.primitives.push((origin, primitive));
    }

    fn empty(&mut self, what: String) {
        debug!("Nothing to assemble for {what}");
        self.diagnostics.push(AssemblyDiagnostic::EmptyInput { what });
    }
}

/// Drives the three assemblers over a decoded scan.
///
/// Holds the build settings, both reference frames and the colour policy so
/// that every pass over a record uses one consistent configuration.
#[derive(Resource)]
pub struct SceneBuilder {
    settings: BuildSettings,
    body_frame: ReferenceFrame,
    sensors: SensorPlacement,
    colours: Box<dyn ColourPolicy>,
    custom_colours: bool,
}

impl SceneBuilder {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            settings: config.build.clone(),
            body_frame: config.body_scan,
            sensors: config.sensors.clone(),
            colours: Box::new(default_colours(&config.build)),
            custom_colours: false,
        }
    }

    pub fn with_colours(mut self, policy: impl ColourPolicy) -> Self {
        self.colours = Box::new(policy);
        self.custom_colours = true;
        self
    }

    /// Pick up a new config. A caller-supplied colour policy is kept.
    pub fn configure(&mut self, config: &EngineConfig) {
        if !self.custom_colours && self.settings != config.build {
            self.colours = Box::new(default_colours(&config.build));
        }
        self.settings = config.build.clone();
        self.body_frame = config.body_scan;
        self.sensors = config.sensors.clone();
    }

    pub fn build(&mut self, decoded: &DecodedScan) -> BuildOutput {
        match decoded {
            DecodedScan::Record(record) => self.build_record(record),
            DecodedScan::Sensors(sensors) => self.build_sensors(sensors),
        }
    }

    pub fn build_record(&mut self, record: &ScanRecord) -> BuildOutput {
        let mut output = BuildOutput::default();
        self.colours.begin_build();

        for (part_index, part) in record.body_parts.iter().enumerate() {
            let label = part.label(part_index);
            if part.layers.is_empty() && part.silhouettes.is_empty() && part.regions.is_empty() {
                output.empty(label);
                continue;
            }

            let layer_style = LineStyle {
                colour: self.colours.body_part_colour(part_index),
                line_width: self.settings.layer_line_width,
            };
            for (layer_index, layer) in part.layers.iter().enumerate() {
                if layer.contour.is_empty() {
                    output.empty(format!("{label} layer {layer_index}"));
                    continue;
                }
                let strip = assemble_contour(
                    &layer.contour,
                    CoordinateMode::Layer,
                    layer.y,
                    &self.body_frame,
                    layer_style,
                );
                output.push(
                    PrimitiveOrigin::Layer {
                        part: part_index,
                        layer: layer_index,
                    },
                    AssembledPrimitive::LineStrip(strip),
                );
            }

            for (index, curve) in part.silhouettes.iter().enumerate() {
                if curve.contour.is_empty() {
                    output.empty(format!("{label} silhouette {index}"));
                    continue;
                }
                let mode = match curve.view {
                    SilhouetteView::Front => CoordinateMode::FrontSilhouette,
                    SilhouetteView::Side => CoordinateMode::SideSilhouette,
                };
                let style = LineStyle {
                    colour: self.colours.silhouette_colour(curve.view),
                    line_width: self.settings.silhouette_line_width,
                };
                let strip = assemble_contour(&curve.contour, mode, 0.0, &self.body_frame, style);
                output.push(
                    PrimitiveOrigin::Silhouette {
                        part: part_index,
                        view: curve.view,
                        index,
                    },
                    AssembledPrimitive::LineStrip(strip),
                );
            }

            for (region_index, region) in part.regions.iter().enumerate() {
                match assemble_region(region, region_index, &self.body_frame, self.colours.as_mut())
                {
                    Ok(mesh) => {
                        if self.settings.wireframe {
                            let wire = wireframe_overlay(&mesh, self.settings.wireframe_colour);
                            output.push(
                                PrimitiveOrigin::RegionWireframe {
                                    part: part_index,
                                    region: region_index,
                                },
                                AssembledPrimitive::Wireframe(wire),
                            );
                        }
                        output.push(
                            PrimitiveOrigin::Region {
                                part: part_index,
                                region: region_index,
                            },
                            AssembledPrimitive::TriangleMesh(mesh),
                        );
                    }
                    Err(reason) => {
                        let err = AssemblyError::MalformedRegion {
                            part: label.clone(),
                            region: region_index,
                            reason,
                        };
                        warn!("Skipping {err}");
                        output.diagnostics.push(AssemblyDiagnostic::MalformedRegion(err));
                    }
                }
            }
        }

        output
    }

    pub fn build_sensors(&mut self, sensors: &[SensorPointCloud]) -> BuildOutput {
        let mut output = BuildOutput::default();
        self.colours.begin_build();

        for (sensor_index, cloud) in sensors.iter().enumerate() {
            let label = cloud.label(sensor_index);
            if cloud.points.is_empty() {
                output.empty(label);
                continue;
            }

            let placement = self.sensors.frame_for(&label);
            let set = assemble_point_cloud(
                cloud,
                sensor_index,
                &placement,
                self.colours.as_mut(),
                self.settings.point_size,
            );
            debug!("Assembled {} points for {label}", set.positions.len());
            output.push(
                PrimitiveOrigin::Sensor {
                    sensor: sensor_index,
                    label,
                },
                AssembledPrimitive::PointSet(set),
            );
        }

        output
    }
}

fn default_colours(settings: &BuildSettings) -> RandomColours {
    RandomColours::new(
        settings.seed,
        settings.mesh_base_colour,
        settings.mesh_alpha_range,
    )
}
