//! Moving a tab from one container to the other.

use super::{DragPayload, DropOutcome, drop_index};
use crate::error::TabError;
use crate::frame_program::rebuild_markup;
use crate::lifecycle;
use crate::tab::{ContainerTag, Containers};

/// Move the dragged tab into `destination` at the slot under `pointer_x`.
///
/// All validation happens before the first mutation, so an error leaves both
/// containers untouched. The tab keeps its name (reserved throughout), the
/// destination's active tab does not change, and an embedded instance sits in
/// the moving set from before detachment until its element is remounted.
pub(super) fn move_tab(
    containers: &mut Containers,
    payload: &DragPayload,
    destination: ContainerTag,
    pointer_x: f32,
    program_path: &str,
) -> Result<DropOutcome, TabError> {
    let source_tag = payload.source_component;
    let name = payload.tab_name.as_str();
    let (source, target) = containers
        .pair_mut(source_tag, destination)
        .ok_or(TabError::ContainerUnavailable(source_tag))?;

    let record = source.tab(name).ok_or_else(|| TabError::TabNotFound {
        container: source_tag,
        name: name.to_string(),
    })?;

    let element = record.content_element.as_ref();
    // A live frame loses its document when re-parented: rebuild it from its
    // navigation state instead.
    let rebuilt = element
        .and_then(|e| e.frame())
        .filter(|host| host.is_program(program_path))
        .map(|host| rebuild_markup(host, program_path));
    let instance = element.and_then(|e| e.instance());
    let content = rebuilt
        .clone()
        .unwrap_or_else(|| record.content.clone());

    let default_request = record.default_request;

    let shared = source.lifecycle().clone();
    let view_state = instance.and_then(|id| {
        let state = lifecycle::capture_view_state(&shared, id);
        shared.lock().mark_moving(id);
        state
    });

    let destination_active = target.active_tab().map(str::to_owned);
    let rects = target.strip().map(|s| s.rects()).unwrap_or_default();
    let index = drop_index(&rects, pointer_x);

    let element = if rebuilt.is_some() {
        None
    } else {
        source.take_content_element(name)
    };

    let moved = target.add_tab(name, content, element, true, Some(index), false);
    source.remove_tab(name, true);
    if let Some(request) = default_request {
        target.adopt_default_request(&moved, request);
    }

    if let Some(active) = destination_active
        && target.contains(&active)
    {
        target.set_active_tab(&active);
    }

    if let Some(id) = instance {
        shared.lock().unmark_moving(id);
        if let Some(state) = view_state {
            lifecycle::restore_view_state(&shared, id, &state);
        }
    }

    log::info!(
        "Moved tab '{}' from {} to {} at index {}",
        moved,
        source_tag,
        destination,
        index
    );
    Ok(DropOutcome::Moved {
        name: moved,
        index,
    })
}
