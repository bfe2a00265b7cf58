#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String), // title
    TaskCreateFailed,
    TaskUpdated(i64),
    TaskDeleted(i64),
    TaskNotFound(i64),
    TaskMarkedComplete(i64),
    TaskMarkedActive(i64),
    TaskArchived(i64),
    TaskUnarchived(i64),
    CompletedTasksCleared(usize),
    TaskTitleRequired,
    TaskSubmissionInFlight,
    TaskFetchFailed(String), // error message
    TasksFetched(usize, String), // count, filter
    TasksHeader(String),         // filter
    NoTasksYet,
    NotEditing,
    EditingTask(String), // title
    InvalidDueDate(String),
    InvalidPriority(String),
    TaskStatusActive,
    TaskStatusComplete,
    ConfirmDeleteTask,
    ConfirmClearCompleted,
    UnscopedMutation,

    // === SESSION MESSAGES ===
    Welcome(String), // greeting name
    SignedInAs(String),
    UserNotLoggedIn,
    NotLoggedInHint,
    LoggedOut,
    SignUpConfirmEmail,
    DisplayNameRequired,
    SessionRefreshing,
    SessionRefreshFailed(String),
    StoredSessionUnreadable(String),
    RemoteSignOutFailed(String),
    SessionStreamClosed,
    LoginHeader,
    CreateAccountHeader,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleBackend,
    ConfigModuleView,
    BackendNotConfigured,

    // === INTERACTIVE MENU ===
    MenuLogin,
    MenuCreateAccount,
    MenuAddTask,
    MenuToggleComplete,
    MenuEditTask,
    MenuDeleteTask,
    MenuToggleArchive,
    MenuChangeFilter,
    MenuClearCompleted,
    MenuRefresh,
    MenuLogout,
    MenuQuit,
    Goodbye,

    // === PROMPTS ===
    PromptSelectModules,
    PromptBackendUrl,
    PromptBackendAnonKey,
    PromptDefaultFilter,
    PromptEmail,
    PromptPassword,
    PromptPasswordConfirm,
    PromptPasswordMismatch,
    PromptDisplayName,
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskDueDate,
    PromptTaskPriority,
    PromptSelectAction,
    PromptSelectTask,
    PromptSelectFilter,

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
