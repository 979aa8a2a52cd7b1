/// Single source of truth for all commands
/// This macro takes a wrapper macro path and applies it to the command list
#[macro_export]
macro_rules! with_commands {
    ($($wrapper:tt)*) => {
        $($wrapper)*![
            // Task catalog and view
            $crate::commands::get_task_catalog,
            $crate::commands::get_view_state,
            // Model lifecycle
            $crate::commands::select_task,
            $crate::commands::reload_model,
            $crate::commands::cancel_model_load,
            // Running
            $crate::commands::set_input,
            $crate::commands::run_model,
            // App configuration
            $crate::commands::load_app_config,
            $crate::commands::save_app_config,
            $crate::commands::reset_app_config,
            // Hub token
            $crate::commands::has_hub_token,
            $crate::commands::save_hub_token,
            $crate::commands::delete_hub_token,
        ]
    };
}
