use egui::{Align2, Color32, CornerRadius, FontId, RichText};
use hal::DeviceInfo;
use motion::{LiveSensorState, SensorSession, SessionConfig};

use crate::format;
use crate::synthetic::{DesktopDeviceInfo, SyntheticAltimeter, SyntheticMotion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Sensors,
    Tools,
    About,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tool {
    Level,
    Compass,
    Proximity,
    SystemInfo,
}

impl Tool {
    const ALL: [(Tool, &'static str); 4] = [
        (Tool::Level, "Level"),
        (Tool::Compass, "Compass"),
        (Tool::Proximity, "Proximity Sensor"),
        (Tool::SystemInfo, "System Info"),
    ];
}

pub struct ToolkitApp {
    session: SensorSession,
    tab: Tab,
    tool: Option<Tool>,
    sensors_started: bool,
}

impl ToolkitApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let session = SensorSession::new(
            Box::new(SyntheticMotion::new()),
            Box::new(SyntheticAltimeter::new()),
            Box::new(DesktopDeviceInfo::new()),
            SessionConfig::default(),
        );
        Self {
            session,
            tab: Tab::Sensors,
            tool: None,
            sensors_started: false,
        }
    }

    fn select_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        // Leaving the tools tab leaves whatever tool was open
        if self.tab == Tab::Tools {
            self.select_tool(None);
        }
        self.tab = tab;
    }

    fn select_tool(&mut self, tool: Option<Tool>) {
        if tool == self.tool {
            return;
        }
        if self.tool == Some(Tool::Proximity) {
            self.session.stop_proximity_monitoring();
        }
        if tool == Some(Tool::Proximity) {
            self.session.start_proximity_monitoring();
        }
        self.tool = tool;
    }

    /// First appearance of the sensors screen starts every subscription
    fn start_sensor_sections(&mut self) {
        if self.sensors_started {
            return;
        }
        self.sensors_started = true;
        if let Err(e) = self.session.start_fused_motion() {
            log::error!("device motion: {e}");
        }
        if let Err(e) = self.session.start_accelerometer() {
            log::error!("accelerometer: {e}");
        }
        if let Err(e) = self.session.start_magnetometer() {
            log::error!("magnetometer: {e}");
        }
        if let Err(e) = self.session.start_gyroscope() {
            log::error!("gyroscope: {e}");
        }
        if let Err(e) = self.session.start_pressure() {
            log::error!("pressure: {e}");
        }
    }

    fn show_sensors(&mut self, ui: &mut egui::Ui) {
        self.start_sensor_sections();
        let state = self.session.state().clone();

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.group(|ui| {
                ui.label(RichText::new("Accelerometer").strong());
                ui.columns(2, |cols| {
                    cols[0].label(RichText::new("With Gravity").underline());
                    for (axis, value) in axes(&state.acceleration) {
                        cols[0].label(format!("{axis}: {:.2} m/s²", format::g_to_ms2(value)));
                    }
                    cols[1].label(RichText::new("User").underline());
                    for (axis, value) in axes(&state.user_acceleration) {
                        cols[1].label(format!("{axis}: {:.2} cm/s²", format::g_to_cms2(value)));
                    }
                });
            });

            ui.group(|ui| {
                ui.label(RichText::new("Magnetometer").strong());
                ui.columns(2, |cols| {
                    cols[0].label(RichText::new("Raw").underline());
                    for (axis, value) in axes(&state.magnetic_field_raw) {
                        cols[0].label(format!("{axis}: {value:.2} µT"));
                    }
                    cols[1].label(RichText::new("Calibrated").underline());
                    for (axis, value) in axes(&state.magnetic_field_calibrated) {
                        cols[1].label(format!("{axis}: {value:.2} µT"));
                    }
                });
            });

            ui.group(|ui| {
                ui.label(RichText::new("Gyroscope").strong());
                ui.columns(2, |cols| {
                    cols[0].label(RichText::new("Rotation Rate").underline());
                    for (axis, value) in axes(&state.rotation_rate) {
                        cols[0].label(format!("{axis}: {:.2} °/s", format::rad_to_deg(value)));
                    }
                    cols[1].label(RichText::new("Attitude").underline());
                    cols[1].label(format!("pitch: {:.2}°", format::rad_to_deg(state.pitch)));
                    cols[1].label(format!("roll: {:.2}°", format::rad_to_deg(state.roll)));
                    cols[1].label(format!("yaw: {:.2}°", format::rad_to_deg(state.yaw)));
                });
            });

            ui.group(|ui| {
                ui.label(RichText::new("Pressure").strong());
                ui.label(format::pressure_kpa(state.pressure));
                ui.label(format!("relative altitude: {:.2} m", state.relative_altitude));
            });
        });
    }

    fn show_tools(&mut self, ui: &mut egui::Ui) {
        let current = self.tool;
        let mut selected = self.tool;
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(150.0);
                ui.heading("Tools");
                ui.separator();
                for (tool, label) in Tool::ALL {
                    if ui.selectable_label(current == Some(tool), label).clicked() {
                        selected = Some(tool);
                    }
                }
            });
            ui.separator();
            ui.vertical(|ui| match current {
                None => {
                    ui.label("Pick a tool from the list.");
                }
                Some(Tool::Level) => show_level(ui, self.session.state()),
                Some(Tool::Compass) => show_compass(ui, self.session.state()),
                Some(Tool::Proximity) => show_proximity(ui, self.session.device()),
                Some(Tool::SystemInfo) => show_system_info(ui, self.session.device()),
            });
        });
        self.select_tool(selected);
    }
}

impl eframe::App for ToolkitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.pump();
        ctx.request_repaint_after(self.session.config().sample_interval);

        let mut tab = self.tab;
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut tab, Tab::Sensors, "Sensors");
                ui.selectable_value(&mut tab, Tab::Tools, "Tools");
                ui.selectable_value(&mut tab, Tab::About, "About");
            });
        });
        self.select_tab(tab);

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Sensors => self.show_sensors(ui),
            Tab::Tools => self.show_tools(ui),
            Tab::About => show_about(ui),
        });
    }
}

fn axes(v: &hal::Vector3d) -> [(&'static str, f64); 3] {
    [("x", v.x), ("y", v.y), ("z", v.z)]
}

fn show_level(ui: &mut egui::Ui, state: &LiveSensorState) {
    ui.heading("Level");
    ui.label(
        RichText::new(format!("{:.1}°", format::tilt_deg(state.gravity.z)))
            .font(FontId::proportional(32.0)),
    );
    ui.add_space(8.0);
    ui.label("Lay the device on a surface to check if it is flat.");
}

fn show_compass(ui: &mut egui::Ui, state: &LiveSensorState) {
    ui.heading("Compass");
    ui.label(RichText::new(format!("{:.0}°", state.heading)).font(FontId::proportional(32.0)));
    ui.add_space(8.0);
    ui.label("Rotate the device to read degrees between you and magnetic north.");
}

fn show_proximity(ui: &mut egui::Ui, device: &dyn DeviceInfo) {
    ui.heading("Proximity Sensor Test");
    let near = device.proximity_near();
    let (fill, text, text_color) = if near {
        (Color32::from_gray(15), "Near", Color32::WHITE)
    } else {
        (Color32::from_gray(225), "Far", Color32::BLACK)
    };
    let size = egui::vec2(ui.available_width().min(240.0), 160.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, CornerRadius::same(6), fill);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(24.0),
        text_color,
    );
    ui.add_space(8.0);
    ui.label("Hold a hand over the sensor.");
    ui.label("The panel turns dark when something is close.");
}

fn show_system_info(ui: &mut egui::Ui, device: &dyn DeviceInfo) {
    ui.heading("System Info");
    egui::Grid::new("system_info").num_columns(2).show(ui, |ui| {
        ui.label("Device Name:");
        ui.label(device.device_name());
        ui.end_row();

        ui.label("Model:");
        ui.label(device.model());
        ui.end_row();

        ui.label("OS:");
        ui.label(format!("{} {}", device.os_name(), device.os_version()));
        ui.end_row();

        ui.label("Battery Level:");
        let battery = device.battery_level();
        if battery < 0.0 {
            ui.label("unknown");
        } else {
            ui.label(format!("{:.0}%", format::fraction_to_percent(battery)));
        }
        ui.end_row();
    });
}

fn show_about(ui: &mut egui::Ui) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading("About");
        ui.add_space(4.0);
        ui.label("Sensors Toolkit");
        ui.label(
            "Reads and visualizes live data from the accelerometer, gyroscope, \
             magnetometer, pressure sensor, and proximity sensor.",
        );
        ui.add_space(8.0);
        ui.label(RichText::new("Readouts").underline());
        ui.label("Sensors: raw and fused values at the configured sample rate.");
        ui.label("Tools: level, compass, proximity test, and system info.");
        ui.add_space(8.0);
        ui.label(RichText::new("Notes").underline());
        ui.label(
            "Calibrated magnetic field, attitude, and heading come from the \
             platform's motion fusion; nothing is filtered or fused here.",
        );
    });
}
