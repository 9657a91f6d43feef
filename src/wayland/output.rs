use {
    super::WaylandState,
    log::debug,
    wayland_client::{
        protocol::wl_output::{self, Transform, WlOutput},
        Connection, Dispatch, QueueHandle, WEnum,
    },
};

/// The state the compositor reports for a single output.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OutputInfo {
    pub transform: Transform,
    pub scale: i32,
}

impl Default for OutputInfo {
    fn default() -> Self {
        Self {
            transform: Transform::Normal,
            scale: 1,
        }
    }
}

struct Output {
    global_name: u32,
    wl_output: WlOutput,
    info: OutputInfo,
}

/// Every output advertised by the compositor, keyed by registry global name.
#[derive(Default)]
pub struct Outputs {
    outputs: Vec<Output>,
}

impl Outputs {
    pub fn add(&mut self, global_name: u32, wl_output: WlOutput) {
        self.outputs.push(Output {
            global_name,
            wl_output,
            info: OutputInfo::default(),
        });
    }

    /// Forget the output with the given global name.
    ///
    /// Returns true when an output was removed.
    pub fn remove(&mut self, global_name: u32) -> bool {
        let before = self.outputs.len();
        self.outputs.retain(|output| output.global_name != global_name);
        before != self.outputs.len()
    }

    /// Forget every output. `wl_output` is bound below the version with a
    /// release request, so the proxies are only dropped.
    pub fn clear(&mut self) {
        self.outputs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Find the global name for a bound output proxy.
    pub fn global_name_of(&self, wl_output: &WlOutput) -> Option<u32> {
        self.outputs
            .iter()
            .find(|output| &output.wl_output == wl_output)
            .map(|output| output.global_name)
    }

    pub fn info(&self, global_name: u32) -> Option<OutputInfo> {
        self.outputs
            .iter()
            .find(|output| output.global_name == global_name)
            .map(|output| output.info)
    }

    fn info_mut(&mut self, global_name: u32) -> Option<&mut OutputInfo> {
        self.outputs
            .iter_mut()
            .find(|output| output.global_name == global_name)
            .map(|output| &mut output.info)
    }
}

/// The outputs a surface is currently shown on, oldest first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnteredOutputs {
    global_names: Vec<u32>,
}

impl EnteredOutputs {
    /// Returns true if the output was not already entered.
    pub fn enter(&mut self, global_name: u32) -> bool {
        if self.global_names.contains(&global_name) {
            return false;
        }
        self.global_names.push(global_name);
        true
    }

    /// Returns true if the output had been entered.
    pub fn leave(&mut self, global_name: u32) -> bool {
        let before = self.global_names.len();
        self.global_names.retain(|&name| name != global_name);
        before != self.global_names.len()
    }

    /// The largest scale of any entered output, or 1 when none are known.
    pub fn buffer_scale(
        &self,
        info_of: impl Fn(u32) -> Option<OutputInfo>,
    ) -> i32 {
        self.global_names
            .iter()
            .filter_map(|&name| info_of(name))
            .map(|info| info.scale)
            .fold(1, i32::max)
    }

    /// The transform of the oldest entered output.
    ///
    /// A surface which spans outputs has no single right answer, so the
    /// first output it entered wins.
    pub fn buffer_transform(
        &self,
        info_of: impl Fn(u32) -> Option<OutputInfo>,
    ) -> Transform {
        self.global_names
            .iter()
            .find_map(|&name| info_of(name))
            .map(|info| info.transform)
            .unwrap_or(Transform::Normal)
    }
}

impl Dispatch<WlOutput, u32> for WaylandState {
    fn event(
        state: &mut Self,
        _proxy: &WlOutput,
        event: wl_output::Event,
        global_name: &u32,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        let Some(info) = state.outputs.info_mut(*global_name) else {
            return;
        };
        let changed = match event {
            wl_output::Event::Geometry {
                transform: WEnum::Value(transform),
                ..
            } => {
                let changed = info.transform != transform;
                info.transform = transform;
                changed
            }
            wl_output::Event::Scale { factor } => {
                let changed = info.scale != factor;
                info.scale = factor;
                changed
            }
            _ => false,
        };
        if changed {
            debug!("Output {} is now {:?}", global_name, info);
            state.window.request_buffer_geometry_update();
        }
    }
}

#[cfg(test)]
mod test {
    use {super::*, std::collections::HashMap};

    fn table(entries: &[(u32, Transform, i32)]) -> HashMap<u32, OutputInfo> {
        entries
            .iter()
            .map(|&(name, transform, scale)| {
                (name, OutputInfo { transform, scale })
            })
            .collect()
    }

    #[test]
    fn no_outputs_means_unscaled_and_untransformed() {
        let entered = EnteredOutputs::default();
        assert_eq!(entered.buffer_scale(|_| None), 1);
        assert_eq!(entered.buffer_transform(|_| None), Transform::Normal);
    }

    #[test]
    fn scale_is_the_largest_entered_scale() {
        let outputs = table(&[
            (1, Transform::Normal, 1),
            (2, Transform::_90, 3),
            (3, Transform::Normal, 2),
        ]);
        let mut entered = EnteredOutputs::default();
        entered.enter(1);
        entered.enter(3);
        assert_eq!(entered.buffer_scale(|n| outputs.get(&n).copied()), 2);

        entered.enter(2);
        assert_eq!(entered.buffer_scale(|n| outputs.get(&n).copied()), 3);
    }

    #[test]
    fn transform_comes_from_the_oldest_entered_output() {
        let outputs =
            table(&[(1, Transform::_270, 1), (2, Transform::_90, 1)]);
        let mut entered = EnteredOutputs::default();
        entered.enter(2);
        entered.enter(1);
        assert_eq!(
            entered.buffer_transform(|n| outputs.get(&n).copied()),
            Transform::_90
        );

        assert!(entered.leave(2));
        assert_eq!(
            entered.buffer_transform(|n| outputs.get(&n).copied()),
            Transform::_270
        );
    }

    #[test]
    fn entering_twice_does_not_duplicate() {
        let mut entered = EnteredOutputs::default();
        assert!(entered.enter(7));
        assert!(!entered.enter(7));
        assert!(entered.leave(7));
        assert!(!entered.leave(7));
    }

    #[test]
    fn unknown_outputs_are_skipped() {
        let outputs = table(&[(5, Transform::_180, 2)]);
        let mut entered = EnteredOutputs::default();
        entered.enter(4);
        entered.enter(5);
        assert_eq!(
            entered.buffer_transform(|n| outputs.get(&n).copied()),
            Transform::_180
        );
        assert_eq!(entered.buffer_scale(|n| outputs.get(&n).copied()), 2);
    }
}
